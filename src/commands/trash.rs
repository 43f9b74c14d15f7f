//! # trash 命令实现
//!
//! 将匹配的文件移入回收站，不做任何转换。
//!
//! ## 依赖关系
//! - 使用 `cli/trash.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `batch/deleter.rs`

use crate::batch::collector::split_patterns;
use crate::batch::{
    delete_batch, ConsoleSink, DeleteSummary, DirectoryTrash, FileCollector, Reporter,
    StatusSink, SystemTrash, Trash,
};
use crate::cli::trash::TrashArgs;
use crate::error::Result;
use crate::models::job::validate_directory;
use crate::utils::output;

use std::path::Path;

/// 执行 trash 命令
pub fn execute(args: TrashArgs) -> Result<()> {
    output::print_header(
        &format!("Moving {} files to the trash", args.from),
        Some(&args.dir),
    );

    let patterns = match &args.pattern {
        Some(p) => split_patterns(p),
        None => args.from.patterns(),
    };

    let trash: Box<dyn Trash> = match &args.trash_dir {
        Some(dir) => Box::new(DirectoryTrash::new(dir)),
        None => Box::new(SystemTrash),
    };

    let mut reporter = Reporter::new(ConsoleSink);
    trash_matching(
        &args.dir,
        &patterns,
        args.recursive,
        trash.as_ref(),
        &mut reporter,
    )?;

    Ok(())
}

/// 扫描并回收匹配的文件（没有匹配时返回 `None`）
pub fn trash_matching<S: StatusSink>(
    dir: &Path,
    patterns: &[String],
    recursive: bool,
    trash: &dyn Trash,
    reporter: &mut Reporter<S>,
) -> Result<Option<DeleteSummary>> {
    validate_directory(dir)?;

    let items = FileCollector::new(dir)
        .with_patterns(patterns)?
        .recursive(recursive)
        .collect();

    if items.is_empty() {
        reporter.nothing_found(dir, patterns);
        return Ok(None);
    }

    Ok(Some(delete_batch(&items, trash, reporter)))
}
