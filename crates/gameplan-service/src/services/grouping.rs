//! Temporal message grouping
//!
//! Consecutive messages collapse under one header when the immediately
//! preceding message has the same author and arrived strictly less than
//! the grouping window earlier. Purely pairwise-adjacent: the rule never
//! looks more than one message back, so a foreign message always breaks a
//! run.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use gameplan_core::value_objects::ActorId;
use gameplan_core::Message;

/// A run of messages rendered under one author/time header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageGroup {
    pub author_id: ActorId,
    pub started_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl MessageGroup {
    fn open_with(message: Message) -> Self {
        Self {
            author_id: message.author_id.clone(),
            started_at: message.created_at,
            messages: vec![message],
        }
    }

    /// Number of messages in the run
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the run is empty (never true for produced groups)
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Group a chronological message sequence
///
/// A pure function of `(author_id, created_at)` over adjacent pairs;
/// recomputing over the same sequence always yields the same groups.
pub fn group_messages(messages: &[Message], window: Duration) -> Vec<MessageGroup> {
    let mut groups: Vec<MessageGroup> = Vec::new();

    for message in messages {
        let extends_run = groups
            .last()
            .and_then(|group| group.messages.last())
            .is_some_and(|last| {
                last.author_id == message.author_id
                    && message.created_at - last.created_at < window
            });

        if extends_run {
            if let Some(group) = groups.last_mut() {
                group.messages.push(message.clone());
            }
        } else {
            groups.push(MessageGroup::open_with(message.clone()));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gameplan_core::value_objects::Snowflake;

    fn at_minute(id: i64, author: &str, minute: i64) -> Message {
        Message::at(
            Snowflake::new(id),
            Snowflake::new(1),
            ActorId::new(author),
            format!("message {id}"),
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minute),
        )
    }

    fn window() -> Duration {
        Duration::minutes(5)
    }

    #[test]
    fn test_five_minute_window_breaks_runs() {
        // t = 0,1,2,3,9: the 3 -> 9 gap is 6 >= 5, so the run breaks
        let messages: Vec<Message> = [0, 1, 2, 3, 9]
            .iter()
            .enumerate()
            .map(|(i, minute)| at_minute(i as i64, "usr_x", *minute))
            .collect();

        let groups = group_messages(&messages, window());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_gap_equal_to_window_breaks() {
        let messages = vec![at_minute(1, "usr_x", 0), at_minute(2, "usr_x", 5)];
        assert_eq!(group_messages(&messages, window()).len(), 2);
    }

    #[test]
    fn test_gap_just_under_window_groups() {
        let messages = vec![at_minute(1, "usr_x", 0), at_minute(2, "usr_x", 4)];
        assert_eq!(group_messages(&messages, window()).len(), 1);
    }

    #[test]
    fn test_foreign_author_breaks_run_pairwise() {
        // Same author before and after, but the interloper splits the run:
        // grouping never looks more than one message back
        let messages = vec![
            at_minute(1, "usr_x", 0),
            at_minute(2, "usr_y", 1),
            at_minute(3, "usr_x", 2),
        ];

        let groups = group_messages(&messages, window());
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let messages = vec![
            at_minute(1, "usr_x", 0),
            at_minute(2, "usr_x", 1),
            at_minute(3, "usr_y", 2),
            at_minute(4, "usr_y", 20),
        ];

        let first = group_messages(&messages, window());
        let second = group_messages(&messages, window());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(group_messages(&[], window()).is_empty());
    }

    #[test]
    fn test_group_header_carries_first_timestamp() {
        let messages = vec![at_minute(1, "usr_x", 0), at_minute(2, "usr_x", 1)];
        let groups = group_messages(&messages, window());
        assert_eq!(groups[0].started_at, messages[0].created_at);
        assert_eq!(groups[0].author_id, ActorId::new("usr_x"));
    }
}
