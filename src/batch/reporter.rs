//! # 批量报告器
//!
//! 在批量开始、每个文件前后、批量结束时生成状态消息，
//! 发送到注入的 `StatusSink`。报告器本身不假设输出目标。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `batch/deleter.rs` 调用
//! - `ConsoleSink` 使用 `utils/output.rs`

use crate::converters::file_name;
use crate::models::{BatchSummary, ConversionResult, Outcome, TargetFormat};
use crate::utils::output;

use std::path::Path;

/// 消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Skipped,
    Warning,
    Failure,
    Done,
}

/// 状态消息接收端
pub trait StatusSink {
    fn emit(&mut self, level: Level, message: &str);
}

/// 终端彩色输出
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, level: Level, message: &str) {
        match level {
            Level::Info => output::print_info(message),
            Level::Success => output::print_success(message),
            Level::Skipped => output::print_skip(message),
            Level::Warning => output::print_warning(message),
            Level::Failure => output::print_failure(message),
            Level::Done => output::print_done(message),
        }
    }
}

/// 回调接收端，只关心消息文本（纯文本输出或 UI 文本框）
pub struct CallbackSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> StatusSink for CallbackSink<F> {
    fn emit(&mut self, _level: Level, message: &str) {
        (self.0)(message)
    }
}

/// 内存接收端（测试用）
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<(Level, String)>,
}

#[cfg(test)]
impl MemorySink {
    pub fn messages(&self) -> Vec<&str> {
        self.lines.iter().map(|(_, m)| m.as_str()).collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.lines.iter().filter(|(l, _)| *l == level).count()
    }
}

#[cfg(test)]
impl StatusSink for MemorySink {
    fn emit(&mut self, level: Level, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}

/// 报告器
pub struct Reporter<S: StatusSink> {
    sink: S,
}

impl<S: StatusSink> Reporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    #[cfg(test)]
    pub fn into_sink(self) -> S {
        self.sink
    }

    // ─────────────────────────────────────────────────────────────
    // 转换阶段
    // ─────────────────────────────────────────────────────────────

    pub fn nothing_found(&mut self, directory: &Path, patterns: &[String]) {
        self.sink.emit(
            Level::Warning,
            &format!(
                "No files found matching '{}' in {}",
                patterns.join(", "),
                directory.display()
            ),
        );
    }

    pub fn batch_started(&mut self, total: usize, target: TargetFormat) {
        self.sink.emit(
            Level::Info,
            &format!("Converting {} file(s) to {}", total, target),
        );
    }

    pub fn item_started(&mut self, index: usize, total: usize, item: &Path) {
        self.sink.emit(
            Level::Info,
            &format!("[{}/{}] {}", index + 1, total, file_name(item)),
        );
    }

    pub fn item_finished(&mut self, index: usize, total: usize, result: &ConversionResult) {
        let name = file_name(&result.item);
        let prefix = format!("[{}/{}]", index + 1, total);

        match &result.outcome {
            Outcome::Success(output) => self.sink.emit(
                Level::Success,
                &format!("{} {} -> {}", prefix, name, file_name(output)),
            ),
            Outcome::Skipped(reason) => self
                .sink
                .emit(Level::Skipped, &format!("{} {}: {}", prefix, name, reason)),
            Outcome::Failure(message) => self
                .sink
                .emit(Level::Failure, &format!("{} {}: {}", prefix, name, message)),
        }
    }

    pub fn batch_finished(&mut self, summary: &BatchSummary) {
        self.sink.emit(
            Level::Done,
            &format!(
                "Converted {} of {} file(s) ({} skipped, {} failed)",
                summary.success,
                summary.total(),
                summary.skipped,
                summary.failed
            ),
        );
    }

    // ─────────────────────────────────────────────────────────────
    // 删除阶段
    // ─────────────────────────────────────────────────────────────

    pub fn trash_started(&mut self, total: usize, destination: &str) {
        self.sink.emit(
            Level::Info,
            &format!("Moving {} original(s) to {}", total, destination),
        );
    }

    pub fn item_kept(&mut self, item: &Path, reason: &str) {
        self.sink
            .emit(Level::Skipped, &format!("Kept {}: {}", file_name(item), reason));
    }

    pub fn item_trashed(&mut self, index: usize, total: usize, item: &Path, error: Option<&str>) {
        let prefix = format!("[{}/{}]", index + 1, total);
        match error {
            None => self.sink.emit(
                Level::Success,
                &format!("{} trashed {}", prefix, file_name(item)),
            ),
            Some(e) => self
                .sink
                .emit(Level::Failure, &format!("{} {}: {}", prefix, file_name(item), e)),
        }
    }

    pub fn trash_finished(&mut self, attempted: usize, trashed: usize) {
        self.sink.emit(
            Level::Done,
            &format!("Trashed {} of {} attempted file(s)", trashed, attempted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_item_messages() {
        let mut reporter = Reporter::new(MemorySink::default());
        let ok = ConversionResult {
            item: PathBuf::from("/d/a.png"),
            outcome: Outcome::Success(PathBuf::from("/d/a.tiff")),
        };
        let bad = ConversionResult {
            item: PathBuf::from("/d/b.png"),
            outcome: Outcome::Failure("decode error: bad header".to_string()),
        };

        reporter.item_started(0, 2, &ok.item);
        reporter.item_finished(0, 2, &ok);
        reporter.item_finished(1, 2, &bad);

        let sink = reporter.into_sink();
        assert_eq!(
            sink.messages(),
            vec![
                "[1/2] a.png",
                "[1/2] a.png -> a.tiff",
                "[2/2] b.png: decode error: bad header",
            ]
        );
        assert_eq!(sink.count(Level::Failure), 1);
    }

    #[test]
    fn test_callback_sink_receives_text() {
        let mut seen = Vec::new();
        {
            let mut reporter = Reporter::new(CallbackSink(|m: &str| seen.push(m.to_string())));
            reporter.nothing_found(Path::new("/photos"), &["*.png".to_string()]);
        }
        assert_eq!(seen, vec!["No files found matching '*.png' in /photos"]);
    }

    #[test]
    fn test_summary_line() {
        let mut reporter = Reporter::new(MemorySink::default());
        reporter.batch_finished(&BatchSummary {
            success: 3,
            skipped: 0,
            failed: 1,
        });
        assert_eq!(
            reporter.into_sink().messages(),
            vec!["Converted 3 of 4 file(s) (0 skipped, 1 failed)"]
        );
    }
}
