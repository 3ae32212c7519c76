//! Test fixtures and data generators
//!
//! Reusable test data for engine integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use gameplan_core::value_objects::{ActorId, Snowflake};
use gameplan_core::{Member, Message};

/// Counter for unique test ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Mint a unique Snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Fixed timeline origin so grouping scenarios are reproducible
pub fn timeline_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

/// A message by `author` at `minute` minutes past the timeline origin
pub fn message_at_minute(channel: Snowflake, author: &str, minute: i64, body: &str) -> Message {
    Message::at(
        unique_id(),
        channel,
        ActorId::new(author),
        body.to_string(),
        timeline_start() + Duration::minutes(minute),
    )
}

/// The usual suspects: a small roster in display order
pub fn roster_members() -> Vec<Member> {
    vec![
        Member::new(ActorId::new("usr_alex"), "Coach Alex", "alex").with_title("Coach"),
        Member::new(ActorId::new("usr_sarah"), "Sarah M.", "sarah"),
        Member::new(ActorId::new("usr_mike"), "Mike T.", "mike"),
        Member::new(ActorId::new("usr_jenny"), "Jenny K.", "jenny"),
    ]
}
