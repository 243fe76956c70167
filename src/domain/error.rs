//! Domain errors

use thiserror::Error;

/// Domain-level error taxonomy. Each variant maps to one HTTP status.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage or crypto failure; the message is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Message suitable for returning to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::Validation(msg) | Self::Unauthorized(msg) | Self::Forbidden(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_details_are_hidden() {
        let err = DomainError::Internal("disk I/O error".into());
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("disk I/O"));
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            DomainError::not_found("Series", 7).public_message(),
            "Series not found"
        );
    }
}
