//! # 美化输出工具
//!
//! 提供统一的终端输出样式。单个文件的失败写到 stdout，与其它状态行
//! 保持顺序；致命错误写到 stderr。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `batch/reporter.rs` 的 `ConsoleSink` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

fn status(tag: ColoredString, msg: &str) {
    println!("{} {}", tag, msg);
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    status("[OK]".green().bold(), msg);
}

/// 打印单个文件失败消息
pub fn print_failure(msg: &str) {
    status("[FAIL]".red().bold(), msg);
}

/// 打印致命错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    status("[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    status("[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    status("[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    status("[DONE]".green().bold(), msg);
}

/// 打印标题栏，附带目录
pub fn print_header(title: &str, directory: Option<&std::path::Path>) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    if let Some(dir) = directory {
        println!("  {}", dir.display().to_string().dimmed());
    }
    println!("{}\n", line.dimmed());
}
