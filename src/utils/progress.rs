//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用（并行转换）
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// 非终端输出时不绘制进度条
pub fn progress_for_terminal(len: u64, message: &str) -> ProgressBar {
    if console::Term::stderr().is_term() {
        create_progress_bar(len, message)
    } else {
        ProgressBar::hidden()
    }
}
