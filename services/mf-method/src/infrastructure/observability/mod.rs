//! 可观测性模块
//!
//! 提供业务 Metrics 记录

pub mod metrics;

pub use metrics::*;
