pub mod auth;
pub mod health;
pub mod measurements;
pub mod metrics;
pub mod request_id;
pub mod sensors;
pub mod series;
