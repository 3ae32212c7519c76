//! Status record - one actor's current declaration for a subject/dimension

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorId, Snowflake, StatusValue};

/// One actor's last declared value for a subject in one dimension
///
/// At most one record exists per `(subject, actor)` pair per dimension; a
/// new declaration replaces the old record, and "no status" is the record's
/// absence rather than a tombstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub subject_id: Snowflake,
    pub actor_id: ActorId,
    pub value: StatusValue,
    pub updated_at: DateTime<Utc>,
}

impl StatusRecord {
    /// Create a record stamped now
    pub fn new(subject_id: Snowflake, actor_id: ActorId, value: StatusValue) -> Self {
        Self {
            subject_id,
            actor_id,
            value,
            updated_at: Utc::now(),
        }
    }

    /// Check whether the record holds a specific value
    #[inline]
    pub fn holds(&self, value: &StatusValue) -> bool {
        &self.value == value
    }
}
