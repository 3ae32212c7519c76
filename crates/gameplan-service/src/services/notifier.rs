//! Notification surface
//!
//! Emits `{kind, message}` events for the presentation layer to render as
//! transient feedback, and keeps them in an inbox with per-item read state
//! (the notification center). The engine renders nothing itself.

use parking_lot::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

use gameplan_core::{Notification, NotificationKind};

/// One inbox entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxItem {
    pub notification: Notification,
    pub read: bool,
}

/// Notification bus plus inbox
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
    inbox: Mutex<Vec<InboxItem>>,
}

impl Notifier {
    /// Create a notifier with the given broadcast buffer
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        Self {
            tx,
            inbox: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to live notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Emit a success notification
    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.emit(Notification::success(message))
    }

    /// Emit a failure notification
    pub fn failure(&self, message: impl Into<String>) -> Notification {
        self.emit(Notification::failure(message))
    }

    fn emit(&self, notification: Notification) -> Notification {
        self.inbox.lock().push(InboxItem {
            notification: notification.clone(),
            read: false,
        });
        // Nobody listening is fine; the inbox still has it
        self.tx.send(notification.clone()).ok();
        notification
    }

    /// Inbox snapshot, newest first
    pub fn inbox(&self) -> Vec<InboxItem> {
        let mut items = self.inbox.lock().clone();
        items.reverse();
        items
    }

    /// Exact count of unread inbox items
    pub fn unread_count(&self) -> usize {
        self.inbox.lock().iter().filter(|item| !item.read).count()
    }

    /// Mark one item read; returns whether it existed
    pub fn mark_read(&self, id: Uuid) -> bool {
        let mut inbox = self.inbox.lock();
        match inbox.iter_mut().find(|item| item.notification.id == id) {
            Some(item) => {
                item.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark everything read; returns how many items flipped
    pub fn mark_all_read(&self) -> usize {
        let mut inbox = self.inbox.lock();
        let mut flipped = 0;
        for item in inbox.iter_mut().filter(|item| !item.read) {
            item.read = true;
            flipped += 1;
        }
        flipped
    }

    /// Remove one item; returns whether it existed
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut inbox = self.inbox.lock();
        let before = inbox.len();
        inbox.retain(|item| item.notification.id != id);
        inbox.len() != before
    }

    /// Count of failure notifications in the inbox (for assertions and
    /// badge rendering)
    pub fn failure_count(&self) -> usize {
        self.inbox
            .lock()
            .iter()
            .filter(|item| item.notification.kind == NotificationKind::Failure)
            .count()
    }
}
