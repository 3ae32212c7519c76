//! Unread tracking
//!
//! Per-channel unread counters driven by an explicit active channel (no
//! ambient selection flag). The state machine per channel is
//! `{zero, nonzero}`: arrivals while the channel is inactive increment,
//! selecting a channel zeroes it, and nothing else may mutate the count -
//! in particular, message content is never inspected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use gameplan_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::digest::{build_digest, ChannelDigest};

/// Unread counters plus the explicitly owned active channel
#[derive(Debug, Default)]
pub struct UnreadTracker {
    active_channel: Option<Snowflake>,
    counts: HashMap<Snowflake, u32>,
}

/// Point-in-time unread view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadSnapshot {
    pub active_channel: Option<Snowflake>,
    pub channels: HashMap<Snowflake, u32>,
    pub global: u32,
}

impl UnreadTracker {
    /// Create a tracker with no active channel
    pub fn new() -> Self {
        Self::default()
    }

    /// A message arrived in `channel`; counts only while the channel is
    /// not the active one. Returns whether it counted.
    pub fn on_message_arrived(&mut self, channel: Snowflake) -> bool {
        if self.active_channel == Some(channel) {
            return false;
        }
        *self.counts.entry(channel).or_insert(0) += 1;
        true
    }

    /// `channel` became the active one; its unread drops to zero as a side
    /// effect of selection, independent of message content
    pub fn on_channel_selected(&mut self, channel: Snowflake) {
        self.active_channel = Some(channel);
        self.counts.remove(&channel);
    }

    /// The currently active channel
    pub fn active_channel(&self) -> Option<Snowflake> {
        self.active_channel
    }

    /// Unread count for one channel
    pub fn unread(&self, channel: Snowflake) -> u32 {
        self.counts.get(&channel).copied().unwrap_or(0)
    }

    /// Global unread, always derived as the sum over all channels
    pub fn global_unread(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Snapshot for the presentation layer
    pub fn snapshot(&self) -> UnreadSnapshot {
        UnreadSnapshot {
            active_channel: self.active_channel,
            channels: self.counts.clone(),
            global: self.global_unread(),
        }
    }
}

/// Unread/digest service over the shared context
pub struct UnreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UnreadService<'a> {
    /// Create a new UnreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Select a channel, zeroing its unread
    #[instrument(skip(self))]
    pub fn channel_selected(&self, channel: Snowflake) {
        self.ctx.unread().on_channel_selected(channel);
    }

    /// Unread count for one channel
    pub fn unread(&self, channel: Snowflake) -> u32 {
        self.ctx.unread().unread(channel)
    }

    /// Global unread across all channels
    pub fn global_unread(&self) -> u32 {
        self.ctx.unread().global_unread()
    }

    /// Snapshot of all counters
    pub fn snapshot(&self) -> UnreadSnapshot {
        self.ctx.unread().snapshot()
    }

    /// Summarize the missed activity in a channel for `viewer_handle`
    ///
    /// The window is the channel's unread tail; counts are exact, the
    /// highlight list is bounded by configuration.
    #[instrument(skip(self))]
    pub fn digest(&self, channel: Snowflake, viewer_handle: &str) -> ChannelDigest {
        let window_len = self.ctx.unread().unread(channel) as usize;
        let feeds = self.ctx.feeds();
        let timeline = feeds.get(&channel).map(Vec::as_slice).unwrap_or_default();
        let window = &timeline[timeline.len().saturating_sub(window_len)..];

        build_digest(
            channel,
            window,
            viewer_handle,
            self.ctx.engine().digest_highlight_limit,
        )
    }
}
