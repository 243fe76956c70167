//! Credential primitives: passwords, bearer tokens, sensor API keys

pub mod api_key;
pub mod jwt;
pub mod password;
