//! # 统一错误处理模块
//!
//! 定义 imgbatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! 路径校验错误是致命的（作业开始前即终止）；解码、编码、回收站错误
//! 只影响单个文件，由批量执行器捕获并转换为状态消息。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// imgbatch 统一错误类型
#[derive(Error, Debug)]
pub enum ImgBatchError {
    // ─────────────────────────────────────────────────────────────
    // 路径错误（致命）
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid path: {path} ({reason})")]
    InvalidPath { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 单文件错误（可恢复）
    // ─────────────────────────────────────────────────────────────
    #[error("decode error: {detail}")]
    DecodeError { path: String, detail: String },

    #[error("encode error: {detail}")]
    EncodeError { path: String, detail: String },

    #[error("trash error: {detail}")]
    TrashError { path: String, detail: String },

    #[error("output already exists: {path}")]
    OutputExists { path: String },

    #[error("{failed} conversion(s) and {trash_failed} trash move(s) failed")]
    BatchIncomplete { failed: usize, trash_failed: usize },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ImgBatchError {
    /// 构造解码错误
    pub fn decode(path: &std::path::Path, detail: impl std::fmt::Display) -> Self {
        ImgBatchError::DecodeError {
            path: path.display().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 构造编码错误
    pub fn encode(path: &std::path::Path, detail: impl std::fmt::Display) -> Self {
        ImgBatchError::EncodeError {
            path: path.display().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ImgBatchError>;
