//! Message feed service
//!
//! Owns each channel's chronological message timeline. Posting is
//! optimistic: the message lands in the local timeline before the
//! collaborator confirms it, and a terminal append failure removes it
//! again and surfaces a failure notification.

use chrono::Duration;
use tracing::{info, instrument, warn};

use gameplan_core::traits::RepoResult;
use gameplan_core::value_objects::{ActorId, Snowflake};
use gameplan_core::{DomainError, Message};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::grouping::{group_messages, MessageGroup};

/// Message feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message authored by the local actor
    ///
    /// The timeline shows the message immediately; a terminal append
    /// failure takes it back out and emits a failure notification.
    #[instrument(skip(self, body))]
    pub async fn post_message(
        &self,
        channel: Snowflake,
        author: ActorId,
        body: String,
    ) -> ServiceResult<Message> {
        if body.trim().is_empty() {
            return Err(ServiceError::validation("message body is empty"));
        }

        let message = Message::new(self.ctx.generate_id(), channel, author, body);
        self.ctx
            .feeds()
            .entry(channel)
            .or_default()
            .push(message.clone());

        match self.append_with_retry(channel, &message).await {
            Ok(()) => {
                info!(channel = %channel, message = %message.id, "Message posted");
                Ok(message)
            }
            Err(err) => {
                if let Some(timeline) = self.ctx.feeds().get_mut(&channel) {
                    timeline.retain(|m| m.id != message.id);
                }
                warn!(
                    channel = %channel,
                    message = %message.id,
                    error = %err,
                    "Message append failed terminally, removed from timeline"
                );
                self.ctx
                    .notifier()
                    .failure("Your message couldn't be sent. Please try again.");
                Err(err.into())
            }
        }
    }

    /// Ingest a message that arrived from another actor
    ///
    /// Inserted in chronological position; bumps the channel's unread
    /// counter unless the channel is active. Returns whether the message
    /// was new.
    #[instrument(skip(self, message))]
    pub fn ingest_remote(&self, message: Message) -> bool {
        let channel = message.channel_id;
        {
            let mut feeds = self.ctx.feeds();
            let timeline = feeds.entry(channel).or_default();
            if timeline.iter().any(|m| m.id == message.id) {
                return false;
            }
            let position = timeline
                .partition_point(|m| (m.created_at, m.id) <= (message.created_at, message.id));
            timeline.insert(position, message);
        }

        self.ctx.unread().on_message_arrived(channel);
        true
    }

    /// Toggle the pinned flag on a message, returning the new state
    ///
    /// Pins are local display state; the persistence boundary carries no
    /// pin write.
    #[instrument(skip(self))]
    pub fn toggle_pin(&self, channel: Snowflake, message_id: Snowflake) -> ServiceResult<bool> {
        let mut feeds = self.ctx.feeds();
        let message = feeds
            .get_mut(&channel)
            .and_then(|timeline| timeline.iter_mut().find(|m| m.id == message_id))
            .ok_or(DomainError::MessageNotFound(message_id))?;
        Ok(message.toggle_pin())
    }

    /// Chronological timeline snapshot for a channel
    pub fn messages(&self, channel: Snowflake) -> Vec<Message> {
        self.ctx.feeds().get(&channel).cloned().unwrap_or_default()
    }

    /// Timeline grouped under author/time headers
    pub fn grouped(&self, channel: Snowflake) -> Vec<MessageGroup> {
        let window = Duration::minutes(self.ctx.engine().grouping_window_minutes);
        group_messages(&self.messages(channel), window)
    }

    async fn append_with_retry(&self, channel: Snowflake, message: &Message) -> RepoResult<()> {
        let mut retries_left = self.ctx.engine().write_retries;
        loop {
            match self.ctx.store().append_message(channel, message).await {
                Ok(()) => return Ok(()),
                Err(err) if retries_left > 0 => {
                    // The store ignores duplicate ids, so a replay after an
                    // ambiguous failure is harmless.
                    retries_left -= 1;
                    warn!(error = %err, "Message append failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}
