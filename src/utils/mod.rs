//! # 工具函数模块
//!
//! 提供美化输出、进度条、日志初始化与 CSV 报告等工具。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 模块使用
//! - 子模块: logging, output, progress, report

pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
