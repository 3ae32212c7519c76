//! Database models (SQLx `FromRow` row structs)

pub mod message;
pub mod status;

pub use message::MessageModel;
pub use status::StatusRecordModel;
