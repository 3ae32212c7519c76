//! Presence partitioning
//!
//! Classifies roster members into online/away/offline from the ledger's
//! presence dimension. The partition is recomputed fully on every read -
//! the member set is small and recomputation is cheaper than tracking -
//! and members without any record classify as offline, so the three
//! buckets always cover the roster exactly once.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use gameplan_core::ledger::{presence_counts, PresenceCounts};
use gameplan_core::value_objects::{ActorId, Dimension, PresenceStatus, Snowflake};
use gameplan_core::{Member, StatusLedger, StatusValue};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::status::StatusService;

/// Roster partitioned by presence, preserving roster order per bucket
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresenceRoster {
    pub online: Vec<Member>,
    pub away: Vec<Member>,
    pub offline: Vec<Member>,
}

impl PresenceRoster {
    /// Total members across all buckets (always the roster size)
    pub fn total(&self) -> usize {
        self.online.len() + self.away.len() + self.offline.len()
    }
}

/// Classify one member from the ledger; no record means offline
pub fn classify(ledger: &StatusLedger, roster: Snowflake, actor: &ActorId) -> PresenceStatus {
    match ledger.get_status(roster, actor, &Dimension::Presence) {
        Some(StatusValue::Presence(status)) => *status,
        _ => PresenceStatus::Offline,
    }
}

/// Partition a member list by presence
pub fn partition_members(
    ledger: &StatusLedger,
    roster: Snowflake,
    members: &[Member],
) -> PresenceRoster {
    let mut partition = PresenceRoster::default();
    for member in members {
        let bucket = match classify(ledger, roster, &member.actor_id) {
            PresenceStatus::Online => &mut partition.online,
            PresenceStatus::Away => &mut partition.away,
            PresenceStatus::Offline => &mut partition.offline,
        };
        bucket.push(member.clone());
    }
    partition
}

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Declare an actor's presence on a roster (optimistic, like any other
    /// status declaration)
    #[instrument(skip(self))]
    pub async fn declare_presence(
        &self,
        roster: Snowflake,
        actor: ActorId,
        status: PresenceStatus,
    ) -> ServiceResult<()> {
        StatusService::new(self.ctx)
            .declare_presence(roster, actor, status)
            .await
    }

    /// Partition the roster for display
    pub fn partition(&self, roster: Snowflake, members: &[Member]) -> PresenceRoster {
        partition_members(&self.ctx.ledger(), roster, members)
    }

    /// Headcount per bucket among declared statuses
    pub fn counts(&self, roster: Snowflake) -> PresenceCounts {
        presence_counts(&self.ctx.ledger(), roster)
    }
}
