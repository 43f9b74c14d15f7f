//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: 批量格式转换，可选删除原文件
//! - `trash`: 仅将匹配的文件移入回收站
//! - `formats`: 列出源格式选择器与目标格式
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, trash

pub mod convert;
pub mod trash;

use clap::{Parser, Subcommand};

/// imgbatch - 批量图像格式转换
#[derive(Parser)]
#[command(name = "imgbatch")]
#[command(version)]
#[command(about = "Batch image format converter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Diagnostic log level (trace/debug/info/warn/error); defaults to RUST_LOG or warn
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert every matching image in a directory to another format
    Convert(convert::ConvertArgs),

    /// Move matching files to the trash without converting them
    Trash(trash::TrashArgs),

    /// List source selectors, their patterns and target encode policies
    Formats,
}
