//! User notification contract.
//!
//! Stores report the outcome of remote mutations through a
//! [`NotificationSink`]; they never raise those failures to their callers.

mod model;
mod sink;

pub use model::{DEFAULT_DISPLAY_DURATION, Notification, NotificationKind, Position};
pub use sink::{NoopNotificationSink, NotificationSink};
