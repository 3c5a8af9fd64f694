//! 领域枚举

mod item_type;
mod method_domain;
mod method_type;
mod operation;
mod statuses;
mod sync_op;

pub use item_type::*;
pub use method_domain::*;
pub use method_type::*;
pub use operation::*;
pub use statuses::*;
pub use sync_op::*;
