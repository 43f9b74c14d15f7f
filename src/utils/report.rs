//! # CSV 转换报告
//!
//! 每个尝试过的文件一行：源文件、输出文件、状态、消息。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `csv` + `serde` 写入

use crate::error::{ImgBatchError, Result};
use crate::models::{ConversionResult, Outcome};

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow {
    source: String,
    output: String,
    status: &'static str,
    message: String,
}

impl From<&ConversionResult> for ReportRow {
    fn from(result: &ConversionResult) -> Self {
        let (output, message) = match &result.outcome {
            Outcome::Success(path) => (path.display().to_string(), String::new()),
            Outcome::Skipped(reason) => (String::new(), reason.clone()),
            Outcome::Failure(message) => (String::new(), message.clone()),
        };

        ReportRow {
            source: result.item.display().to_string(),
            output,
            status: result.outcome.label(),
            message,
        }
    }
}

/// 写出转换报告
pub fn write_csv(results: &[ConversionResult], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for result in results {
        wtr.serialize(ReportRow::from(result))?;
    }

    wtr.flush().map_err(|e| ImgBatchError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
