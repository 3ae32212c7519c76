//! Missed-activity digest
//!
//! Summarizes a channel's unread window: exact message and mention counts,
//! plus a bounded list of highlights. The highlight selection is
//! deterministic - pinned messages first (chronological), then the most
//! recent of the rest - and never affects the counts.

use serde::{Deserialize, Serialize};

use gameplan_core::value_objects::Snowflake;
use gameplan_core::Message;

/// Digest of a channel's unread window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDigest {
    pub channel_id: Snowflake,
    /// Exact number of messages in the window
    pub message_count: usize,
    /// Exact number of window messages mentioning the viewer
    pub mention_count: usize,
    /// Bounded, deterministic selection of notable messages
    pub highlights: Vec<Message>,
}

impl ChannelDigest {
    /// Whether there is anything to report
    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }
}

/// Build the digest for one channel window
pub fn build_digest(
    channel_id: Snowflake,
    window: &[Message],
    viewer_handle: &str,
    highlight_limit: usize,
) -> ChannelDigest {
    let mention_count = window
        .iter()
        .filter(|message| message.mentions(viewer_handle))
        .count();

    let mut highlights: Vec<Message> = window
        .iter()
        .filter(|message| message.pinned)
        .take(highlight_limit)
        .cloned()
        .collect();
    for message in window.iter().rev().filter(|message| !message.pinned) {
        if highlights.len() >= highlight_limit {
            break;
        }
        highlights.push(message.clone());
    }

    ChannelDigest {
        channel_id,
        message_count: window.len(),
        mention_count,
        highlights,
    }
}
