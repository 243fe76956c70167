//! Series module: range-bounded measurement channels

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
