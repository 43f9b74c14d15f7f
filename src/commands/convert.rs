//! # convert 命令实现
//!
//! 批量转换图像格式，可选将原文件移入回收站。
//!
//! ## 流程
//! 1. 校验根目录（失败即终止）
//! 2. 扫描 → 逐项转换 → 逐项报告
//! 3. （可选）全部转换报告完成后重新扫描，只回收本次成功转换的原文件
//! 4. 有文件转换失败或未能移入回收站时以非零状态退出
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `converters/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/report.rs`

use crate::batch::collector::split_patterns;
use crate::batch::reporter::CallbackSink;
use crate::batch::{
    delete_batch, BatchOutcome, BatchRunner, ConsoleSink, DeleteSummary, DirectoryTrash,
    FileCollector, Reporter, StatusSink, SystemTrash, Trash,
};
use crate::cli::convert::ConvertArgs;
use crate::converters::{Converter, Decoder};
use crate::error::{ImgBatchError, Result};
use crate::models::ConversionJob;
use crate::utils::{output, progress, report};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// 一次作业的执行结果
#[derive(Debug, Default)]
pub struct JobReport {
    /// 转换阶段（没有匹配文件时为 `None`）
    pub conversion: Option<BatchOutcome>,
    /// 删除阶段（未请求删除或没有匹配文件时为 `None`）
    pub deletion: Option<DeleteSummary>,
}

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header(
        &format!("Converting {} images to {}", args.from, args.to),
        Some(&args.dir),
    );

    if args.delete && args.pattern.is_none() && args.from.overlaps(args.to) {
        return Err(ImgBatchError::InvalidArgument(format!(
            "--delete cannot be used when converting {} to {}: the originals and outputs share a pattern",
            args.from, args.to
        )));
    }

    let patterns = match &args.pattern {
        Some(p) => split_patterns(p),
        None => args.from.patterns(),
    };

    let job = ConversionJob::new(&args.dir, patterns, args.to)?
        .recursive(args.recursive)
        .on_conflict(args.on_conflict);

    let converter = Converter::new(Decoder::new(args.magick.clone()));

    let mut runner = BatchRunner::new(args.jobs);
    if runner.is_parallel() {
        runner = runner.with_progress(progress::progress_for_terminal(0, "Converting"));
    }

    let trash: Option<Box<dyn Trash>> = match (args.delete, &args.trash_dir) {
        (false, _) => None,
        (true, Some(dir)) => Some(Box::new(DirectoryTrash::new(dir))),
        (true, None) => Some(Box::new(SystemTrash)),
    };

    let job_report = if args.plain {
        let mut reporter = Reporter::new(CallbackSink(|m: &str| println!("{}", m)));
        run_job(&job, &converter, &runner, trash.as_deref(), &mut reporter)?
    } else {
        let mut reporter = Reporter::new(ConsoleSink);
        run_job(&job, &converter, &runner, trash.as_deref(), &mut reporter)?
    };

    if let (Some(path), Some(conversion)) = (&args.report, &job_report.conversion) {
        report::write_csv(&conversion.results, path)?;
        output::print_info(&format!("Report written to {}", path.display()));
    }

    ensure_complete(&job_report)
}

/// 有文件转换失败或未能移入回收站时返回错误（非零退出）
fn ensure_complete(job_report: &JobReport) -> Result<()> {
    let failed = job_report
        .conversion
        .as_ref()
        .map_or(0, |c| c.summary.failed);
    let trash_failed = job_report
        .deletion
        .as_ref()
        .map_or(0, |d| d.failures.len());

    if failed > 0 || trash_failed > 0 {
        return Err(ImgBatchError::BatchIncomplete {
            failed,
            trash_failed,
        });
    }
    Ok(())
}

/// 执行一次作业：扫描 → 转换 → 报告 →（可选）回收
pub fn run_job<S: StatusSink>(
    job: &ConversionJob,
    converter: &Converter,
    runner: &BatchRunner,
    trash: Option<&dyn Trash>,
    reporter: &mut Reporter<S>,
) -> Result<JobReport> {
    let collector = FileCollector::for_job(job)?;
    let items = collector.collect();

    if items.is_empty() {
        reporter.nothing_found(job.source_directory(), job.source_patterns());
        return Ok(JobReport::default());
    }

    info!(count = items.len(), target = %job.target(), "starting batch");

    let target = job.target();
    let policy = job.conflict_policy();
    let conversion = runner.run(&items, target, reporter, |item| {
        converter.convert(item, target, policy)
    });

    let deletion = trash.map(|trash| {
        let converted: HashSet<&Path> = conversion
            .results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.item.as_path())
            .collect();

        // 所有转换写入完成后重新扫描
        let (deletable, kept): (Vec<PathBuf>, Vec<PathBuf>) = collector
            .collect()
            .into_iter()
            .partition(|item| converted.contains(item.as_path()));

        for item in &kept {
            reporter.item_kept(item, "not converted in this run");
        }
        delete_batch(&deletable, trash, reporter)
    });

    Ok(JobReport {
        conversion: Some(conversion),
        deletion,
    })
}
