//! Aggregate projector - pure derivations over a ledger snapshot
//!
//! Every displayed count is recomputed from the ledger on read. No call
//! site maintains its own counter, so the sum invariant
//! `sum(counts) == actors with a record` cannot drift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorId, Dimension, PresenceStatus, Rsvp, Snowflake, StatusValue};

use super::StatusLedger;

/// Count of records per value for one `(subject, dimension)`
pub fn project(
    ledger: &StatusLedger,
    subject: Snowflake,
    dimension: &Dimension,
) -> HashMap<StatusValue, usize> {
    let mut counts: HashMap<StatusValue, usize> = HashMap::new();
    for value in ledger.statuses(subject, dimension).into_values() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// RSVP tally for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceTally {
    pub going: usize,
    pub maybe: usize,
    pub declined: usize,
}

impl AttendanceTally {
    /// Total number of members who answered at all
    #[inline]
    pub fn responses(&self) -> usize {
        self.going + self.maybe + self.declined
    }

    /// Headroom left under an optional capacity, counting only "going"
    pub fn spots_left(&self, capacity: Option<u32>) -> Option<u32> {
        capacity.map(|cap| cap.saturating_sub(self.going as u32))
    }
}

/// Project the attendance dimension of an event into a tally
pub fn attendance_tally(ledger: &StatusLedger, event: Snowflake) -> AttendanceTally {
    let mut tally = AttendanceTally::default();
    for value in ledger.statuses(event, &Dimension::Attendance).into_values() {
        match value {
            StatusValue::Attendance(Rsvp::Going) => tally.going += 1,
            StatusValue::Attendance(Rsvp::Maybe) => tally.maybe += 1,
            StatusValue::Attendance(Rsvp::Declined) => tally.declined += 1,
            _ => {}
        }
    }
    tally
}

/// Aggregated reaction for display on one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: usize,
    /// Whether the viewing actor is in this emoji's actor-set
    pub me: bool,
}

/// Project every reaction dimension of a message, from the viewer's side
///
/// Sorted by count descending, then emoji, so re-renders are stable.
pub fn reaction_summary(
    ledger: &StatusLedger,
    message: Snowflake,
    viewer: &ActorId,
) -> Vec<ReactionCount> {
    let mut summary: Vec<ReactionCount> = ledger
        .dimensions(message)
        .into_iter()
        .filter_map(|dimension| {
            let emoji = dimension.reaction_emoji()?.to_string();
            let actors = ledger.statuses(message, &dimension);
            Some(ReactionCount {
                me: actors.contains_key(viewer),
                count: actors.len(),
                emoji,
            })
        })
        .collect();

    summary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emoji.cmp(&b.emoji)));
    summary
}

/// Headcount per presence bucket for one roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresenceCounts {
    pub online: usize,
    pub away: usize,
    pub offline: usize,
}

/// Project the presence dimension of a roster into bucket headcounts
///
/// Only declared statuses are counted here; members with no record at all
/// are classified offline by the partition layer, which knows the roster.
pub fn presence_counts(ledger: &StatusLedger, roster: Snowflake) -> PresenceCounts {
    let mut counts = PresenceCounts::default();
    for value in ledger.statuses(roster, &Dimension::Presence).into_values() {
        match value {
            StatusValue::Presence(PresenceStatus::Online) => counts.online += 1,
            StatusValue::Presence(PresenceStatus::Away) => counts.away += 1,
            StatusValue::Presence(PresenceStatus::Offline) => counts.offline += 1,
            _ => {}
        }
    }
    counts
}
