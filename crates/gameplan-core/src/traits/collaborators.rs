//! Persistence collaborator trait (port) - the asynchronous boundary
//!
//! The domain defines what it needs from the authoritative store; the
//! infrastructure layer provides the implementation. No ordering or
//! transactionality is assumed beyond per-call success/failure, and the
//! store must tolerate duplicate writes of the same final value (the
//! coordinator retries idempotent writes once).

use async_trait::async_trait;

use crate::entities::{Message, StatusRecord};
use crate::error::DomainError;
use crate::value_objects::{ActorId, Dimension, Snowflake, StatusValue};

/// Result type for collaborator operations
pub type RepoResult<T> = Result<T, DomainError>;

/// The authoritative remote store for statuses and messages
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Persist one actor's declaration for a subject/dimension.
    ///
    /// `None` retracts the declaration (reaction toggle-off); retracting a
    /// declaration that is already absent is not an error.
    async fn write_status(
        &self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
        value: Option<&StatusValue>,
    ) -> RepoResult<()>;

    /// Fetch the authoritative set of records for a subject/dimension
    /// (initial load and reconciliation)
    async fn fetch_statuses(
        &self,
        subject: Snowflake,
        dimension: &Dimension,
    ) -> RepoResult<Vec<StatusRecord>>;

    /// Append a message to a channel
    async fn append_message(&self, channel: Snowflake, message: &Message) -> RepoResult<()>;
}
