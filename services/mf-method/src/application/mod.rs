//! 应用层
//!
//! 命令/查询定义与编排处理器。规划器是纯同步代码，
//! 处理器负责装载上下文并把计划交给仓储执行。

pub mod commands;
pub mod handler;
pub mod planner;
pub mod procedure;
pub mod queries;
pub mod recalculate;

pub use commands::*;
pub use handler::*;
pub use planner::{ClonePlanner, ListOverrideStats, TargetAnchor, TargetSpec};
pub use procedure::{apply_procedure_template, plan_procedure_sync, ProcedureSyncSummary};
pub use queries::*;
pub use recalculate::RequirementsPlanner;
