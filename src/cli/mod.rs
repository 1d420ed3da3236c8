//! CLI 模块
//!
//! 交互式图编辑器的命令处理、补全和结果打印

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::{PrintMode, Printer};
