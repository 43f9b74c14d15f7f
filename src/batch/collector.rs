//! # 文件收集器
//!
//! 根据根目录和 glob 模式集合收集待处理文件列表。
//!
//! ## 功能
//! - 单个或多个 glob 模式（如大小写两种扩展名）
//! - 可选递归目录搜索
//! - 每次调用都重新访问文件系统，不做缓存
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs`, `commands/trash.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{ImgBatchError, Result};
use crate::models::ConversionJob;

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// 根目录
    root: PathBuf,
    /// 匹配模式列表（为空时匹配所有文件）
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 按作业参数创建收集器
    pub fn for_job(job: &ConversionJob) -> Result<Self> {
        Ok(Self::new(job.source_directory())
            .with_patterns(job.source_patterns())?
            .recursive(job.is_recursive()))
    }

    /// 设置匹配模式列表
    pub fn with_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| {
                    ImgBatchError::InvalidArgument(format!("Invalid pattern '{}': {}", p.as_ref(), e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.patterns = compiled;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 惰性扫描，按文件系统枚举顺序产出匹配文件
    pub fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(move |e| self.matches_patterns(e.path()))
            .map(|e| e.into_path())
    }

    /// 收集所有匹配的文件（排序、去重）
    pub fn collect(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self.scan().collect();
        files.sort();
        files.dedup();
        files
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

/// 解析逗号分隔的多模式字符串
pub fn split_patterns(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_case_variant_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.heic");
        touch(dir.path(), "b.HEIC");
        touch(dir.path(), "c.png");

        let files = FileCollector::new(dir.path())
            .with_patterns(&["*.heic", "*.HEIC"])
            .unwrap()
            .collect();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.heic", "b.HEIC"]);
    }

    #[test]
    fn test_non_recursive_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.png");
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.png");
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let collector = FileCollector::new(dir.path()).with_patterns(&["*.png"]).unwrap();
        assert_eq!(collector.collect().len(), 1);

        let recursive = collector.recursive(true);
        assert_eq!(recursive.collect().len(), 2);
    }

    #[test]
    fn test_rescan_sees_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let collector = FileCollector::new(dir.path()).with_patterns(&["*.png"]).unwrap();
        assert!(collector.collect().is_empty());

        touch(dir.path(), "late.png");
        assert_eq!(collector.scan().count(), 1);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FileCollector::new(".").with_patterns(&["[unclosed"]).unwrap_err();
        assert!(matches!(err, ImgBatchError::InvalidArgument(_)));
    }

    #[test]
    fn test_split_patterns() {
        assert_eq!(split_patterns("*.jpg, *.JPG,,"), vec!["*.jpg", "*.JPG"]);
        assert!(split_patterns(" , ").is_empty());
    }
}
