//! Engine construction helpers

use std::sync::Arc;

use gameplan_common::EngineConfig;
use gameplan_db::MemoryStatusStore;
use gameplan_service::ServiceContext;

/// A context wired to an in-memory collaborator, plus a handle to the
/// store for outcome scripting and assertions
pub struct TestEngine {
    pub store: Arc<MemoryStatusStore>,
    pub ctx: ServiceContext,
}

/// Build an engine with default tunables
pub fn engine() -> TestEngine {
    engine_with(EngineConfig::default())
}

/// Build an engine with custom tunables
pub fn engine_with(config: EngineConfig) -> TestEngine {
    let store = Arc::new(MemoryStatusStore::new());
    let ctx = ServiceContext::new(store.clone(), config);
    TestEngine { store, ctx }
}
