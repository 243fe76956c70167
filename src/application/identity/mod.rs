//! Identity module: authentication and self-service profile
//!
//! Contains the `IdentityService` which orchestrates registration, login,
//! bearer-token resolution and profile updates.

pub mod service;

pub use service::{AuthResult, IdentityService};
