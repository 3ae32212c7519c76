//! Status record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the status_records table
///
/// `dimension` and `value` carry the text wire encoding
/// (`attendance`/`presence`/`reaction:<emoji>`, `going`/`reacted`/...).
/// A unique index on (subject_id, actor_id, dimension) enforces the
/// replace-never-append rule at the store too.
#[derive(Debug, Clone, FromRow)]
pub struct StatusRecordModel {
    pub subject_id: i64,
    pub actor_id: String,
    pub dimension: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
