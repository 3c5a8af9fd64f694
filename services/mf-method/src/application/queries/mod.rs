//! 应用查询

pub mod tree_queries;

pub use tree_queries::*;
