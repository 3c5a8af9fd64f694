//! 领域实体

pub mod method;
pub mod sales;
pub mod tracked_entity;

pub use method::*;
pub use sales::*;
pub use tracked_entity::*;
