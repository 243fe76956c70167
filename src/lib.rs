//! # Measures Service
//!
//! REST service for collecting measurement data. Administrators define
//! series (numeric channels with a valid range), and measurements are
//! recorded against them by administrators or by API-key sensors.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, errors and repository traits
//! - **application**: Business rules (identity, series, measurements, sensors)
//! - **infrastructure**: External concerns (database, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting helpers (graceful shutdown)
//! - **server**: Runtime lifecycle shared by the binary and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
