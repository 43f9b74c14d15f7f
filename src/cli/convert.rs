//! # convert 子命令 CLI 定义
//!
//! 批量转换图像格式 (jpeg/png/webp/tiff/gif/bmp/avif/heic -> jpeg/png/tiff/webp/gif/bmp/pdf)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use crate::models::{ConflictPolicy, SourceFormat, TargetFormat};

use clap::Args;
use std::path::PathBuf;

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory containing the images
    #[arg(env = "IMGBATCH_DIR")]
    pub dir: PathBuf,

    /// Source format selector
    #[arg(short, long, value_enum)]
    pub from: SourceFormat,

    /// Target format
    #[arg(short, long, value_enum)]
    pub to: TargetFormat,

    /// Glob patterns overriding the selector (comma separated)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Move originals to the trash after converting
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,

    /// Move originals into this directory instead of the system trash
    #[arg(long, requires = "delete")]
    pub trash_dir: Option<PathBuf>,

    /// What to do when the output file already exists
    #[arg(long, value_enum, default_value_t = ConflictPolicy::Skip)]
    pub on_conflict: ConflictPolicy,

    /// Number of parallel conversions (0 = all cores)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Write a CSV report of every attempted file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// ImageMagick command used for HEIC/HEIF/AVIF sources
    #[arg(long, env = "IMGBATCH_MAGICK", default_value = "magick")]
    pub magick: String,

    /// Plain uncolored status lines
    #[arg(long, default_value_t = false)]
    pub plain: bool,
}
