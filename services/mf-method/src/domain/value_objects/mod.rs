//! 值对象

mod config_key;
mod ids;

pub use config_key::*;
pub use ids::*;
