//! Message entity - one chat message in a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorId, Snowflake};

/// Chat message
///
/// Body and author are immutable after creation; within this subsystem a
/// message is only ever mutated through pin-toggle (reactions live in the
/// status ledger, keyed by message id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: ActorId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub pinned: bool,
    pub thread_reply_count: u32,
}

impl Message {
    /// Create a new message stamped now
    pub fn new(id: Snowflake, channel_id: Snowflake, author_id: ActorId, body: String) -> Self {
        Self::at(id, channel_id, author_id, body, Utc::now())
    }

    /// Create a message with an explicit timestamp (remote arrivals)
    pub fn at(
        id: Snowflake,
        channel_id: Snowflake,
        author_id: ActorId,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            channel_id,
            author_id,
            body,
            created_at,
            pinned: false,
            thread_reply_count: 0,
        }
    }

    /// Flip the pinned flag, returning the new state
    pub fn toggle_pin(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }

    /// Check if message body is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Whether the body mentions `handle` as an `@handle` token
    ///
    /// Case-insensitive; the token must end at a non-word character or at
    /// the end of the body, so `@sam` does not match inside `@samantha`.
    pub fn mentions(&self, handle: &str) -> bool {
        if handle.is_empty() {
            return false;
        }
        let body = self.body.to_lowercase();
        let handle = handle.to_lowercase();

        body.match_indices('@').any(|(at, _)| {
            let candidate = &body[at + 1..];
            candidate.starts_with(handle.as_str())
                && candidate[handle.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_alphanumeric() && c != '_')
        })
    }

    /// Get a truncated preview of the body (for digests and notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.body.len() <= max_len {
            &self.body
        } else {
            let mut end = max_len;
            while !self.body.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.body[..end]
        }
    }
}
