//! HTTP 接口层

pub mod dto;
pub mod routing;

pub use routing::{api_routes, AppState};
