//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub channel_id: i64,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub pinned: bool,
    pub thread_reply_count: i32,
}
