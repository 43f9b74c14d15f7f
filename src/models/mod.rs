//! # 数据模型模块
//!
//! 定义格式、转换作业和转换结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/`, `converters/` 和 `commands/` 使用
//! - 子模块: format, job, result

pub mod format;
pub mod job;
pub mod result;

pub use format::{SourceFormat, TargetFormat};
pub use job::{output_path_for, ConflictPolicy, ConversionJob};
pub use result::{BatchSummary, ConversionResult, Outcome};
