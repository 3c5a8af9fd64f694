//! 基础设施层
//!
//! 包含持久化与可观测性实现

pub mod observability;
pub mod persistence;
