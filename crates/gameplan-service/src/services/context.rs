//! Service context - dependency container for the engine
//!
//! Owns the status ledger (the single mutable resource; only the
//! coordinator's apply/rollback paths write to it), the per-channel message
//! feeds, the unread tracker, the notification surface, and the in-flight
//! write tickets that implement the supersede rule.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};

use gameplan_common::EngineConfig;
use gameplan_core::traits::StatusStore;
use gameplan_core::value_objects::{ActorId, Dimension, Snowflake, SnowflakeGenerator};
use gameplan_core::{Message, StatusLedger};

use super::notifier::Notifier;
use super::unread::UnreadTracker;

/// Key identifying one independent stream of writes
pub(crate) type SyncKey = (Snowflake, ActorId, Dimension);

/// Shared dependency container for all services
pub struct ServiceContext {
    // Local state (synchronous, never held across an await)
    ledger: Mutex<StatusLedger>,
    feeds: Mutex<HashMap<Snowflake, Vec<Message>>>,
    unread: Mutex<UnreadTracker>,

    // Collaborators
    store: Arc<dyn StatusStore>,
    notifier: Notifier,

    // In-flight write tickets: latest ticket per key wins, everything
    // older resolves as stale
    inflight: DashMap<SyncKey, u64>,
    tickets: AtomicU64,

    ids: SnowflakeGenerator,
    engine: EngineConfig,
}

impl ServiceContext {
    /// Create a context around a persistence collaborator
    pub fn new(store: Arc<dyn StatusStore>, engine: EngineConfig) -> Self {
        let notifier = Notifier::new(engine.notification_buffer);
        Self {
            ledger: Mutex::new(StatusLedger::new()),
            feeds: Mutex::new(HashMap::new()),
            unread: Mutex::new(UnreadTracker::new()),
            store,
            notifier,
            inflight: DashMap::new(),
            tickets: AtomicU64::new(0),
            ids: SnowflakeGenerator::default(),
            engine,
        }
    }

    /// Lock the status ledger for a synchronous critical section
    pub fn ledger(&self) -> MutexGuard<'_, StatusLedger> {
        self.ledger.lock()
    }

    /// Lock the per-channel message feeds
    pub(crate) fn feeds(&self) -> MutexGuard<'_, HashMap<Snowflake, Vec<Message>>> {
        self.feeds.lock()
    }

    /// Lock the unread tracker
    pub(crate) fn unread(&self) -> MutexGuard<'_, UnreadTracker> {
        self.unread.lock()
    }

    /// Get the persistence collaborator
    pub fn store(&self) -> &dyn StatusStore {
        self.store.as_ref()
    }

    /// Get the notification surface
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Get the engine tunables
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Mint a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.ids.generate()
    }

    // === In-flight write tickets ===

    /// Claim the key for a new write; any earlier in-flight resolution for
    /// it becomes stale from this moment
    pub(crate) fn begin_sync(&self, key: SyncKey) -> u64 {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        self.inflight.insert(key, ticket);
        ticket
    }

    /// Whether `ticket` still owns the key
    pub(crate) fn is_current(&self, key: &SyncKey, ticket: u64) -> bool {
        self.inflight.get(key).is_some_and(|current| *current == ticket)
    }

    /// Release the key if `ticket` still owns it
    pub(crate) fn end_sync(&self, key: &SyncKey, ticket: u64) {
        self.inflight.remove_if(key, |_, current| *current == ticket);
    }

    /// Drop every in-flight claim for a subject/dimension, so resolutions
    /// still in the air cannot roll back over reconciled state
    pub(crate) fn abandon_sync(&self, subject: Snowflake, dimension: &Dimension) {
        self.inflight
            .retain(|(key_subject, _, key_dimension), _| {
                !(*key_subject == subject && key_dimension == dimension)
            });
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn StatusStore")
            .field("inflight", &self.inflight.len())
            .finish()
    }
}
