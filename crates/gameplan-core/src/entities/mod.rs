//! Domain entities

pub mod channel;
pub mod event;
pub mod member;
pub mod message;
pub mod record;

pub use channel::Channel;
pub use event::TeamEvent;
pub use member::Member;
pub use message::Message;
pub use record::StatusRecord;
