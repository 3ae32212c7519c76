//! Application error types
//!
//! Unified error handling above the domain layer.

use gameplan_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // External collaborator errors
    #[error("Store error: {0}")]
    Store(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for logs and notifications
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check whether the error can be retried against the collaborator
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(_) => true,
            Self::Domain(e) => e.is_store(),
            _ => false,
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound("member".to_string()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Store("timeout".to_string()).error_code(), "STORE_ERROR");
        let domain = AppError::from(DomainError::StoreError("down".to_string()));
        assert_eq!(domain.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::Store("timeout".to_string()).is_retryable());
        assert!(AppError::from(DomainError::StoreError("x".to_string())).is_retryable());
        assert!(!AppError::Validation("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_helper_methods() {
        let err = AppError::not_found("event 123");
        assert_eq!(err.to_string(), "Resource not found: event 123");

        let err = AppError::validation("title is required");
        assert_eq!(err.to_string(), "Validation error: title is required");
    }
}
