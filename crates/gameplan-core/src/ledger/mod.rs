//! Status ledger - single source of truth for declared statuses
//!
//! The ledger holds at most one record per `(subject, actor)` pair per
//! dimension. It is the only mutable resource in the engine: every read
//! (projection, partition, digest) is a pure function over its current
//! contents, and only `set_status`/`clear_status` (and their rollback
//! twins in the coordinator) may write.

pub mod projector;

use std::collections::HashMap;

use crate::entities::StatusRecord;
use crate::error::DomainError;
use crate::value_objects::{ActorId, Dimension, Snowflake, StatusValue};

pub use projector::{
    attendance_tally, presence_counts, project, reaction_summary, AttendanceTally,
    PresenceCounts, ReactionCount,
};

type DimensionRecords = HashMap<ActorId, StatusRecord>;

/// In-process store of all status records, keyed subject → dimension → actor
#[derive(Debug, Default)]
pub struct StatusLedger {
    records: HashMap<Snowflake, HashMap<Dimension, DimensionRecords>>,
}

impl StatusLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `(subject, actor)` in `dimension`, replacing any
    /// earlier declaration, and return the replaced value.
    ///
    /// Synchronous and total once inputs validate: the closed-enumeration
    /// check runs before any mutation (fail closed), and the
    /// replace-never-append rule keeps decrement-old/increment-new a single
    /// step as far as any observer is concerned.
    pub fn set_status(
        &mut self,
        subject: Snowflake,
        actor: ActorId,
        dimension: Dimension,
        value: StatusValue,
    ) -> Result<Option<StatusValue>, DomainError> {
        if !dimension.accepts(&value) {
            return Err(DomainError::ValueOutsideDimension {
                dimension: dimension.to_string(),
                value: value.to_string(),
            });
        }

        let record = StatusRecord::new(subject, actor.clone(), value);
        let previous = self
            .records
            .entry(subject)
            .or_default()
            .entry(dimension)
            .or_default()
            .insert(actor, record);

        Ok(previous.map(|r| r.value))
    }

    /// Remove the record for `(subject, actor)` in `dimension`, returning
    /// the removed value. Absence is the only representation of "no
    /// status", so this is how a reaction toggles off and how a rollback
    /// restores a never-declared state.
    pub fn clear_status(
        &mut self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
    ) -> Option<StatusValue> {
        let by_dimension = self.records.get_mut(&subject)?;
        let by_actor = by_dimension.get_mut(dimension)?;
        let removed = by_actor.remove(actor);

        if by_actor.is_empty() {
            by_dimension.remove(dimension);
            if by_dimension.is_empty() {
                self.records.remove(&subject);
            }
        }

        removed.map(|r| r.value)
    }

    /// Look up the current value for `(subject, actor)` in `dimension`
    pub fn get_status(
        &self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
    ) -> Option<&StatusValue> {
        self.records
            .get(&subject)?
            .get(dimension)?
            .get(actor)
            .map(|r| &r.value)
    }

    /// Snapshot of all declarations for `(subject, dimension)` keyed by
    /// actor; order is irrelevant (a set keyed by actor)
    pub fn statuses(
        &self,
        subject: Snowflake,
        dimension: &Dimension,
    ) -> HashMap<ActorId, StatusValue> {
        self.records
            .get(&subject)
            .and_then(|by_dimension| by_dimension.get(dimension))
            .map(|by_actor| {
                by_actor
                    .iter()
                    .map(|(actor, record)| (actor.clone(), record.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of actors with any record for `(subject, dimension)`
    pub fn actor_count(&self, subject: Snowflake, dimension: &Dimension) -> usize {
        self.records
            .get(&subject)
            .and_then(|by_dimension| by_dimension.get(dimension))
            .map_or(0, DimensionRecords::len)
    }

    /// Dimensions currently recorded for a subject
    pub fn dimensions(&self, subject: Snowflake) -> Vec<Dimension> {
        self.records
            .get(&subject)
            .map(|by_dimension| by_dimension.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Reconciliation: replace everything held for `(subject, dimension)`
    /// with an authoritative snapshot, fully overwriting local guesses.
    ///
    /// Records whose value falls outside the dimension abort the whole
    /// replacement before any mutation (fail closed).
    pub fn replace_all(
        &mut self,
        subject: Snowflake,
        dimension: &Dimension,
        snapshot: Vec<StatusRecord>,
    ) -> Result<(), DomainError> {
        if let Some(bad) = snapshot.iter().find(|r| !dimension.accepts(&r.value)) {
            return Err(DomainError::ValueOutsideDimension {
                dimension: dimension.to_string(),
                value: bad.value.to_string(),
            });
        }

        let fresh: DimensionRecords = snapshot
            .into_iter()
            .map(|record| (record.actor_id.clone(), record))
            .collect();

        if fresh.is_empty() {
            if let Some(by_dimension) = self.records.get_mut(&subject) {
                by_dimension.remove(dimension);
                if by_dimension.is_empty() {
                    self.records.remove(&subject);
                }
            }
        } else {
            self.records
                .entry(subject)
                .or_default()
                .insert(dimension.clone(), fresh);
        }

        Ok(())
    }
}
