//! # gameplan-core
//!
//! Domain layer for the GamePlan status engine: value objects, entities,
//! the status ledger with its aggregate projections, domain errors, and the
//! persistence-collaborator trait. This crate has zero dependencies on
//! infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod ledger;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Channel, Member, Message, StatusRecord, TeamEvent};
pub use error::DomainError;
pub use events::{Notification, NotificationKind};
pub use ledger::{
    attendance_tally, presence_counts, project, reaction_summary, AttendanceTally,
    PresenceCounts, ReactionCount, StatusLedger,
};
pub use traits::{RepoResult, StatusStore};
pub use value_objects::{
    ActorId, Dimension, PresenceStatus, Rsvp, Snowflake, SnowflakeGenerator, SnowflakeParseError,
    StatusValue,
};
