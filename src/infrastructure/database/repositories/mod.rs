//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod measurement_repository;
pub mod repository_provider;
pub mod sensor_repository;
pub mod series_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

/// Map unique-constraint violations to a validation error carrying `message`
pub(crate) fn unique_or_db_err(e: DbErr, message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Validation(message.to_string()),
        _ => db_err(e),
    }
}
