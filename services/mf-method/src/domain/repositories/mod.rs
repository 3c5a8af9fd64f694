//! 仓储接口

pub mod configuration_rule_repository;
pub mod item_repository;
pub mod job_repository;
pub mod method_repository;
pub mod procedure_repository;
pub mod quote_repository;
pub mod resource_repository;

pub use configuration_rule_repository::*;
pub use item_repository::*;
pub use job_repository::*;
pub use method_repository::*;
pub use procedure_repository::*;
pub use quote_repository::*;
pub use resource_repository::*;
