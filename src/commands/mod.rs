//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `converters/`, `models/`, `utils/`
//! - 子模块: convert, trash, formats

pub mod convert;
pub mod formats;
pub mod trash;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Convert(args) => convert::execute(args),
        Commands::Trash(args) => trash::execute(args),
        Commands::Formats => formats::execute(),
    }
}
