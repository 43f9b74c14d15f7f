//! # 原文件删除
//!
//! 将原文件移入可恢复的回收站，而不是永久删除。
//!
//! ## 功能
//! - `SystemTrash`: 操作系统回收站（`trash` crate）
//! - `DirectoryTrash`: 移动到指定目录，重名时追加序号
//! - 单个文件失败只记录并报告，其余文件继续处理
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs`, `commands/trash.rs` 调用
//! - 使用 `batch/reporter.rs` 发送消息

use super::reporter::{Reporter, StatusSink};
use crate::error::{ImgBatchError, Result};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 可恢复删除的目标
pub trait Trash: Sync {
    /// 将单个文件移入回收站
    fn trash(&self, path: &Path) -> Result<()>;

    /// 目标描述（用于消息）
    fn describe(&self) -> String;
}

/// 操作系统回收站
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn trash(&self, path: &Path) -> Result<()> {
        trash::delete(path).map_err(|e| ImgBatchError::TrashError {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        "the system trash".to_string()
    }
}

/// 移动到指定目录
#[derive(Debug, Clone)]
pub struct DirectoryTrash {
    dir: PathBuf,
}

impl DirectoryTrash {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 目标目录中未被占用的文件名
    fn free_destination(&self, path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let candidate = self.dir.join(&name);
        if !candidate.exists() {
            return candidate;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        (1..)
            .map(|n| self.dir.join(format!("{}.{}{}", stem, n, ext)))
            .find(|p| !p.exists())
            .unwrap_or(candidate)
    }
}

impl Trash for DirectoryTrash {
    fn trash(&self, path: &Path) -> Result<()> {
        let to_error = |e: std::io::Error| ImgBatchError::TrashError {
            path: path.display().to_string(),
            detail: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(to_error)?;
        let dest = self.free_destination(path);

        // 跨文件系统时 rename 失败，退回复制后删除
        if fs::rename(path, &dest).is_err() {
            fs::copy(path, &dest).map_err(to_error)?;
            fs::remove_file(path).map_err(to_error)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// 删除统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteSummary {
    /// 尝试数量
    pub attempted: usize,
    /// 成功移入回收站数量
    pub trashed: usize,
    /// 失败详情
    pub failures: Vec<(PathBuf, String)>,
}

/// 批量移入回收站
pub fn delete_batch<S: StatusSink>(
    items: &[PathBuf],
    trash: &dyn Trash,
    reporter: &mut Reporter<S>,
) -> DeleteSummary {
    let total = items.len();
    reporter.trash_started(total, &trash.describe());

    let mut summary = DeleteSummary::default();
    for (index, item) in items.iter().enumerate() {
        summary.attempted += 1;
        match trash.trash(item) {
            Ok(()) => {
                summary.trashed += 1;
                reporter.item_trashed(index, total, item, None);
            }
            Err(e) => {
                warn!(path = %item.display(), error = %e, "failed to trash");
                reporter.item_trashed(index, total, item, Some(&e.to_string()));
                summary.failures.push((item.clone(), e.to_string()));
            }
        }
    }

    reporter.trash_finished(summary.attempted, summary.trashed);
    summary
}
