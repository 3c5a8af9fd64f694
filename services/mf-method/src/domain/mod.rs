//! 领域层

pub mod configuration;
pub mod entities;
pub mod enums;
pub mod plan;
pub mod rates;
pub mod repositories;
pub mod tree;
pub mod value_objects;
pub mod views;

pub use configuration::*;
pub use entities::*;
pub use enums::*;
pub use plan::*;
pub use rates::*;
pub use repositories::*;
pub use tree::*;
pub use value_objects::*;
pub use views::*;
