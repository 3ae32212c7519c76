//! Events emitted toward the presentation layer

pub mod notification;

pub use notification::{Notification, NotificationKind};
