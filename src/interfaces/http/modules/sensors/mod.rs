//! Sensors module: registration and API-key data submission

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
