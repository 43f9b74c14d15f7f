//! # 转换结果模型
//!
//! 每个文件一次转换尝试产生一个 `ConversionResult`，由报告器立即消费。

use std::path::PathBuf;

/// 单个文件的转换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 转换成功（输出路径）
    Success(PathBuf),
    /// 跳过（如输出已存在）
    Skipped(String),
    /// 转换失败（错误信息）
    Failure(String),
}

impl Outcome {
    /// 状态标签（用于报告）
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failure(_) => "failure",
        }
    }
}

/// 转换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub item: PathBuf,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    #[cfg(test)]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }
}

/// 批量转换统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
}

impl BatchSummary {
    /// 合并处理结果
    pub fn merge(&mut self, result: &ConversionResult) {
        match result.outcome {
            Outcome::Success(_) => self.success += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failure(_) => self.failed += 1,
        }
    }

    /// 总尝试数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}
