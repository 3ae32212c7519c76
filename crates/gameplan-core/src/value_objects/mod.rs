//! Value objects - identifiers and closed status enumerations

pub mod actor;
pub mod snowflake;
pub mod status;

pub use actor::ActorId;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use status::{Dimension, PresenceStatus, Rsvp, StatusValue};
