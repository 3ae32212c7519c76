//! Team event entity - the attendance subject

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Calendar event members RSVP to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEvent {
    pub id: Snowflake,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Maximum headcount; `None` means unlimited
    pub capacity: Option<u32>,
}

impl TeamEvent {
    /// Create a new event
    pub fn new(id: Snowflake, title: String, starts_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            starts_at,
            location: None,
            description: None,
            capacity: None,
        }
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the capacity
    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Whether the event start time has passed
    #[inline]
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }
}
