//! # 转换作业模型
//!
//! `ConversionJob` 在作业开始时构造一次，之后不可变。
//! 根目录在构造时校验一次，扫描时不再重复校验。

use super::format::{SourceFormat, TargetFormat};
use crate::error::{ImgBatchError, Result};

use std::path::{Path, PathBuf};

/// 同名输出文件已存在时的处理策略
#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Replace the existing file
    Overwrite,
    /// Leave the existing file and report the item as skipped
    #[default]
    Skip,
    /// Report the item as failed
    Error,
}

/// 一次批量转换作业
#[derive(Debug, Clone)]
pub struct ConversionJob {
    source_directory: PathBuf,
    source_patterns: Vec<String>,
    target: TargetFormat,
    recursive: bool,
    on_conflict: ConflictPolicy,
}

impl ConversionJob {
    /// 创建作业，校验根目录
    pub fn new(
        source_directory: impl Into<PathBuf>,
        source_patterns: Vec<String>,
        target: TargetFormat,
    ) -> Result<Self> {
        let source_directory = source_directory.into();
        validate_directory(&source_directory)?;

        if source_patterns.is_empty() {
            return Err(ImgBatchError::InvalidArgument(
                "at least one source pattern is required".to_string(),
            ));
        }

        Ok(Self {
            source_directory,
            source_patterns,
            target,
            recursive: false,
            on_conflict: ConflictPolicy::default(),
        })
    }

    /// 由源格式选择器创建作业
    #[cfg(test)]
    pub fn from_selector(
        source_directory: impl Into<PathBuf>,
        source: SourceFormat,
        target: TargetFormat,
    ) -> Result<Self> {
        Self::new(source_directory, source.patterns(), target)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    pub fn source_patterns(&self) -> &[String] {
        &self.source_patterns
    }

    pub fn target(&self) -> TargetFormat {
        self.target
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.on_conflict
    }
}

/// 校验根目录存在且为目录
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ImgBatchError::InvalidPath {
            path: path.display().to_string(),
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(ImgBatchError::InvalidPath {
            path: path.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

/// 输出路径：同目录、同主文件名、替换扩展名
///
/// 源扩展名与目标扩展名仅大小写不同或相同时（同格式重编码）追加 `_converted`，
/// 大小写不敏感的文件系统上源文件也不会被覆盖。
pub fn output_path_for(source: &Path, target: TargetFormat) -> PathBuf {
    let same_extension = source
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(target.extension()));
    if !same_extension {
        return source.with_extension(target.extension());
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{}_converted.{}", stem, target.extension()))
}
