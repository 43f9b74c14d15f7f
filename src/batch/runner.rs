//! # 批量执行器
//!
//! 对每个文件恰好执行一次转换，单个失败不会中断批量。
//!
//! ## 功能
//! - 默认顺序执行：每个文件前后各发送一条状态消息
//! - `jobs != 1` 时转换步骤在 rayon 线程池并行执行，
//!   结果按扫描顺序收集后再顺序报告，输出保持确定
//! - 汇总统计
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `batch/reporter.rs` 发送消息
//! - 使用 `rayon` 进行并行计算，`indicatif` 显示并行进度

use super::reporter::{Reporter, StatusSink};
use crate::models::{BatchSummary, ConversionResult, TargetFormat};

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 批量执行结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub results: Vec<ConversionResult>,
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    /// 并行模式下的进度条
    progress: Option<ProgressBar>,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = 全部 CPU 核心）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            progress: None,
        }
    }

    /// 并行模式下显示进度条
    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.progress = Some(pb);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.jobs > 1
    }

    /// 对所有文件执行转换并报告
    pub fn run<S, F>(
        &self,
        items: &[PathBuf],
        target: TargetFormat,
        reporter: &mut Reporter<S>,
        convert: F,
    ) -> BatchOutcome
    where
        S: StatusSink,
        F: Fn(&Path) -> ConversionResult + Sync + Send,
    {
        let total = items.len();
        reporter.batch_started(total, target);

        let results = if self.is_parallel() {
            self.run_parallel(items, reporter, &convert)
        } else {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    reporter.item_started(index, total, item);
                    let result = convert(item);
                    reporter.item_finished(index, total, &result);
                    result
                })
                .collect()
        };

        let mut summary = BatchSummary::default();
        for result in &results {
            summary.merge(result);
        }
        reporter.batch_finished(&summary);

        BatchOutcome { summary, results }
    }

    fn run_parallel<S, F>(
        &self,
        items: &[PathBuf],
        reporter: &mut Reporter<S>,
        convert: &F,
    ) -> Vec<ConversionResult>
    where
        S: StatusSink,
        F: Fn(&Path) -> ConversionResult + Sync + Send,
    {
        if let Some(pb) = &self.progress {
            pb.set_length(items.len() as u64);
        }

        let convert_all = || -> Vec<ConversionResult> {
            items
                .par_iter()
                .map(|item| {
                    let result = convert(item);
                    if let Some(pb) = &self.progress {
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        };

        let results = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool.install(convert_all),
            Err(e) => {
                warn!(error = %e, "thread pool unavailable, converting on the global pool");
                convert_all()
            }
        };

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        let total = results.len();
        for (index, result) in results.iter().enumerate() {
            reporter.item_started(index, total, &result.item);
            reporter.item_finished(index, total, result);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::reporter::{Level, MemorySink};
    use crate::models::Outcome;

    fn fake_convert(item: &Path) -> ConversionResult {
        let name = item.file_name().unwrap().to_str().unwrap();
        let outcome = if name.starts_with("bad") {
            Outcome::Failure("decode error: broken".to_string())
        } else {
            Outcome::Success(item.with_extension("tiff"))
        };
        ConversionResult {
            item: item.to_path_buf(),
            outcome,
        }
    }

    fn items() -> Vec<PathBuf> {
        ["a.jpg", "bad.jpg", "c.jpg", "d.jpg"]
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    #[test]
    fn test_every_item_attempted_once() {
        let mut reporter = Reporter::new(MemorySink::default());
        let outcome = BatchRunner::new(1).run(&items(), TargetFormat::Tiff, &mut reporter, fake_convert);

        assert_eq!(outcome.results.len(), 4);
        assert_eq!(outcome.summary.success, 3);
        assert_eq!(outcome.summary.failed, 1);

        let sink = reporter.into_sink();
        // 开始 + 每项前后各一条 + 结束
        assert_eq!(sink.lines.len(), 1 + 4 * 2 + 1);
        assert_eq!(sink.count(Level::Failure), 1);
        assert_eq!(sink.messages()[1], "[1/4] a.jpg");
        assert_eq!(sink.messages()[2], "[1/4] a.jpg -> a.tiff");
    }

    #[test]
    fn test_parallel_reports_in_scan_order() {
        let mut reporter = Reporter::new(MemorySink::default());
        let outcome = BatchRunner::new(4).run(&items(), TargetFormat::Tiff, &mut reporter, fake_convert);

        let order: Vec<_> = outcome.results.iter().map(|r| r.item.clone()).collect();
        assert_eq!(order, items());

        let sink = reporter.into_sink();
        assert_eq!(sink.messages()[3], "[2/4] bad.jpg");
        assert_eq!(sink.messages()[4], "[2/4] bad.jpg: decode error: broken");
    }

    #[test]
    fn test_zero_jobs_means_all_cores() {
        let runner = BatchRunner::new(0);
        assert_eq!(runner.jobs, num_cpus::get());
    }
}
