//! # formats 命令实现
//!
//! 以表格列出源格式选择器及其 glob 模式，以及目标格式的编码策略。
//!
//! ## 依赖关系
//! - 使用 `models/format.rs`
//! - 使用 `tabled` 显示表格

use crate::error::Result;
use crate::models::{SourceFormat, TargetFormat};
use crate::utils::output;

use clap::ValueEnum;
use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct SourceRow {
    #[tabled(rename = "Selector")]
    selector: String,
    #[tabled(rename = "Patterns")]
    patterns: String,
}

#[derive(Debug, Tabled)]
struct TargetRow {
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Extension")]
    extension: String,
    #[tabled(rename = "Encode policy")]
    policy: String,
}

fn source_rows() -> Vec<SourceRow> {
    SourceFormat::value_variants()
        .iter()
        .map(|f| SourceRow {
            selector: f
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_else(|| f.to_string()),
            patterns: f.patterns().join(" "),
        })
        .collect()
}

fn target_rows() -> Vec<TargetRow> {
    TargetFormat::all()
        .iter()
        .map(|t| TargetRow {
            target: format!("{:?}", t).to_lowercase(),
            extension: format!(".{}", t.extension()),
            policy: t.policy().to_string(),
        })
        .collect()
}

/// 执行 formats 命令
pub fn execute() -> Result<()> {
    output::print_header("Source selectors", None);
    println!("{}", Table::new(source_rows()));

    output::print_header("Target formats", None);
    println!("{}", Table::new(target_rows()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rows_use_cli_names() {
        let rows = source_rows();
        let pdf = rows.iter().find(|r| r.patterns == "pdf_*").unwrap();
        assert_eq!(pdf.selector, "pdf-prefixed");

        let heic = rows.iter().find(|r| r.selector == "heic").unwrap();
        assert!(heic.patterns.contains("*.HEIC"));
    }

    #[test]
    fn test_target_rows_cover_every_target() {
        let rows = target_rows();
        assert_eq!(rows.len(), TargetFormat::all().len());
        assert!(rows.iter().any(|r| r.extension == ".jpeg" && r.policy.contains("95")));
    }
}
