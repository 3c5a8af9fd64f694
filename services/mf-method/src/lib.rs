//! anvil-mf-method - 制造方法同步引擎
//!
//! 在物品主数据、作业与报价三个域之间复制整棵制造方法树，
//! 并承担作业域的需求量级联重算。

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
