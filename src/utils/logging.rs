//! # 日志初始化
//!
//! 诊断日志走 `tracing`，写到 stderr；面向用户的状态行由 `output.rs` 负责。
//! 级别优先取 `--log-level`，其次 `RUST_LOG`，默认 `warn`。

use tracing_subscriber::EnvFilter;

pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // 测试中可能重复初始化
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
