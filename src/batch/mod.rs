//! # 批量处理模块
//!
//! 扫描 → 逐项转换 → 逐项报告 → 可选删除原文件。
//!
//! ## 功能
//! - 按 glob 模式集合收集文件
//! - 顺序或并行执行转换
//! - 通过可注入的接收端报告进度
//! - 原文件移入回收站
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod deleter;
pub mod reporter;
pub mod runner;

pub use collector::FileCollector;
pub use deleter::{delete_batch, DeleteSummary, DirectoryTrash, SystemTrash, Trash};
pub use reporter::{ConsoleSink, Reporter, StatusSink};
pub use runner::{BatchOutcome, BatchRunner};
