//! In-memory StatusStore with scriptable write outcomes
//!
//! Used by tests and local development. Each write pops the next scripted
//! outcome: it can fail, and it can wait on a gate so a test controls the
//! exact interleaving of in-flight writes (the coordinator's supersede and
//! rollback paths are all about that interleaving). An empty script means
//! every write succeeds immediately.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use gameplan_core::traits::{RepoResult, StatusStore};
use gameplan_core::value_objects::{ActorId, Dimension, Snowflake, StatusValue};
use gameplan_core::{DomainError, Message, StatusRecord};

/// Scripted result for one write attempt
#[derive(Clone, Default)]
pub struct WriteOutcome {
    fail: bool,
    gate: Option<Arc<Notify>>,
}

impl WriteOutcome {
    /// The write succeeds
    pub fn ok() -> Self {
        Self::default()
    }

    /// The write fails
    pub fn fail() -> Self {
        Self {
            fail: true,
            gate: None,
        }
    }

    /// The write waits on `gate` before resolving
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// In-memory persistence collaborator
#[derive(Default)]
pub struct MemoryStatusStore {
    statuses: Mutex<HashMap<(Snowflake, Dimension), HashMap<ActorId, StatusRecord>>>,
    messages: Mutex<HashMap<Snowflake, Vec<Message>>>,
    script: Mutex<VecDeque<WriteOutcome>>,
    write_attempts: AtomicUsize,
}

impl MemoryStatusStore {
    /// Create an empty store where every write succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next unscripted write attempt
    pub fn push_outcome(&self, outcome: WriteOutcome) {
        self.script.lock().push_back(outcome);
    }

    /// Make the next `n` write attempts fail
    pub fn fail_next_writes(&self, n: usize) {
        let mut script = self.script.lock();
        for _ in 0..n {
            script.push_back(WriteOutcome::fail());
        }
    }

    /// Total write attempts observed (including retries)
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Stored records for assertions
    pub fn records(&self, subject: Snowflake, dimension: &Dimension) -> Vec<StatusRecord> {
        self.statuses
            .lock()
            .get(&(subject, dimension.clone()))
            .map(|by_actor| by_actor.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Stored messages for assertions
    pub fn messages_in(&self, channel: Snowflake) -> Vec<Message> {
        self.messages.lock().get(&channel).cloned().unwrap_or_default()
    }

    /// Seed a record directly (initial-load and reconciliation tests)
    pub fn seed_record(&self, record: StatusRecord, dimension: Dimension) {
        self.statuses
            .lock()
            .entry((record.subject_id, dimension))
            .or_default()
            .insert(record.actor_id.clone(), record);
    }

    async fn resolve_next(&self) -> RepoResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);

        // Pop under the lock, await outside it
        let outcome = self.script.lock().pop_front();
        let Some(outcome) = outcome else {
            return Ok(());
        };

        if let Some(gate) = outcome.gate {
            gate.notified().await;
        }
        if outcome.fail {
            return Err(DomainError::StoreError("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn write_status(
        &self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
        value: Option<&StatusValue>,
    ) -> RepoResult<()> {
        self.resolve_next().await?;

        let mut statuses = self.statuses.lock();
        let by_actor = statuses.entry((subject, dimension.clone())).or_default();
        match value {
            Some(value) => {
                by_actor.insert(
                    actor.clone(),
                    StatusRecord::new(subject, actor.clone(), value.clone()),
                );
            }
            None => {
                by_actor.remove(actor);
            }
        }

        Ok(())
    }

    async fn fetch_statuses(
        &self,
        subject: Snowflake,
        dimension: &Dimension,
    ) -> RepoResult<Vec<StatusRecord>> {
        Ok(self.records(subject, dimension))
    }

    async fn append_message(&self, channel: Snowflake, message: &Message) -> RepoResult<()> {
        self.resolve_next().await?;

        let mut messages = self.messages.lock();
        let timeline = messages.entry(channel).or_default();
        // Idempotent under the coordinator's retry
        if !timeline.iter().any(|m| m.id == message.id) {
            timeline.push(message.clone());
        }

        Ok(())
    }
}
