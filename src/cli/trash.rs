//! # trash 子命令 CLI 定义
//!
//! 将匹配的文件移入回收站，不做转换
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/trash.rs`

use crate::models::SourceFormat;

use clap::Args;
use std::path::PathBuf;

/// trash 子命令参数
#[derive(Args, Debug)]
pub struct TrashArgs {
    /// Directory containing the files
    #[arg(env = "IMGBATCH_DIR")]
    pub dir: PathBuf,

    /// Source format selector
    #[arg(short, long, value_enum)]
    pub from: SourceFormat,

    /// Glob patterns overriding the selector (comma separated)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Move files into this directory instead of the system trash
    #[arg(long)]
    pub trash_dir: Option<PathBuf>,
}
