//! 应用命令

pub mod sync_commands;

pub use sync_commands::*;
