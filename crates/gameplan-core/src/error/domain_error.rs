//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Local invariant violations (programming errors; fail closed, never
    // reachable through well-typed callers)
    // =========================================================================
    #[error("Value '{value}' is outside dimension '{dimension}'")]
    ValueOutsideDimension { dimension: String, value: String },

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    // =========================================================================
    // Collaborator Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Malformed status record from store: {0}")]
    InvalidStatusEncoding(String),
}

impl DomainError {
    /// Get an error code string for logging and notifications
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValueOutsideDimension { .. } => "VALUE_OUTSIDE_DIMENSION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::StoreError(_) => "STORE_ERROR",
            Self::InvalidStatusEncoding(_) => "INVALID_STATUS_ENCODING",
        }
    }

    /// Check if this is a local invariant violation (programming error)
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::ValueOutsideDimension { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound(_) | Self::ChannelNotFound(_))
    }

    /// Check if this came back from the persistence collaborator
    pub fn is_store(&self) -> bool {
        matches!(self, Self::StoreError(_) | Self::InvalidStatusEncoding(_))
    }
}
