//! Notification sink implementations.
//!
//! Stores notify synchronously; these sinks forward to a channel consumer or
//! to the tracing pipeline.

use steer_core::notification::{Notification, NotificationKind, NotificationSink};
use tokio::sync::mpsc;

/// A sink that forwards notifications to an unbounded channel.
///
/// Used by front ends that render notifications on their own task.
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotificationSink {
    pub fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Creates a sink together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn notify(&self, notification: Notification) {
        // Non-blocking send; a dropped receiver just discards
        if self.sender.send(notification).is_err() {
            tracing::trace!("Notification receiver dropped");
        }
    }
}

/// A sink that writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        let message = notification.message.as_str();
        match notification.kind {
            NotificationKind::Error => tracing::error!(target: "steer::notification", "{message}"),
            NotificationKind::Warning => tracing::warn!(target: "steer::notification", "{message}"),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(target: "steer::notification", "{message}")
            }
        }
    }
}
