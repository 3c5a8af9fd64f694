//! 只读视图
//!
//! 其他服务维护的参考数据，本服务只读取。

pub mod configuration_rule;
pub mod item;
pub mod job;
pub mod procedure;
pub mod resources;

pub use configuration_rule::*;
pub use item::*;
pub use job::*;
pub use procedure::*;
pub use resources::*;
