//! # imgbatch - 批量图像格式转换工具
//!
//! 扫描目录中匹配的图像，逐个转换为目标格式，可选将原文件移入回收站。
//!
//! ## 子命令
//! - `convert` - 批量格式转换 (JPEG, PNG, TIFF, WebP, GIF, BMP, PDF)
//! - `trash`   - 将匹配的文件移入回收站
//! - `formats` - 列出源格式选择器与目标编码策略
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (扫描、执行、报告、删除)
//!   │     ├── converters/(解码、通道处理、编码)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod converters;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.log_level.as_deref());

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
