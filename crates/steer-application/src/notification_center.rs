//! Observable queue of on-screen notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use steer_core::notification::{Notification, NotificationSink};
use steer_core::reactive::{Readable, Subscription, Writable};

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNotification {
    pub id: u64,
    pub notification: Notification,
}

/// Holds the notifications to display and expires them after their
/// display duration.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    active: Writable<Vec<ActiveNotification>>,
    next_id: Arc<AtomicU64>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification` and returns its id.
    ///
    /// Inside a tokio runtime, removal is scheduled after the display
    /// duration; elsewhere the entry stays until dismissed.
    pub fn push(&self, notification: Notification) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let duration = notification.display_duration;
        self.active.update(|items| items.push(ActiveNotification { id, notification }));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let center = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    center.dismiss(id);
                });
            }
            Err(_) => tracing::debug!(id, "No runtime, notification will not expire"),
        }
        id
    }

    /// Removes the notification with `id`. Returns whether it was shown.
    pub fn dismiss(&self, id: u64) -> bool {
        self.active.update_if(|items| {
            let before = items.len();
            items.retain(|n| n.id != id);
            items.len() != before
        })
    }

    pub fn active(&self) -> Vec<ActiveNotification> {
        self.active.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<ActiveNotification>) + Send + Sync + 'static,
    {
        self.active.subscribe(listener)
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, notification: Notification) {
        self.push(notification);
    }
}
