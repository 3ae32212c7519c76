//! # gameplan-db
//!
//! Persistence layer implementing the `StatusStore` collaborator trait from
//! `gameplan-core`.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model ↔ entity mappers (text wire encoding for dimensions/values)
//! - `PgStatusStore`: PostgreSQL implementation
//! - `MemoryStatusStore`: in-memory implementation with scriptable write
//!   outcomes, used by tests and local development
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gameplan_db::pool::{create_pool, DatabaseConfig};
//! use gameplan_db::PgStatusStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     let store = PgStatusStore::new(pool);
//!     // Hand the store to the service context...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryStatusStore, WriteOutcome};
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::PgStatusStore;
