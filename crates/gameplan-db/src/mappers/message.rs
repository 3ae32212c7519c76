//! MessageModel ↔ Message mapping

use gameplan_core::value_objects::{ActorId, Snowflake};
use gameplan_core::Message;

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        let mut message = Message::at(
            Snowflake::new(model.id),
            Snowflake::new(model.channel_id),
            ActorId::new(model.author_id),
            model.body,
            model.created_at,
        );
        message.pinned = model.pinned;
        message.thread_reply_count = model.thread_reply_count.max(0) as u32;
        message
    }
}
