//! Application layer for Steer.
//!
//! Stores that keep the client's in-memory collections consistent with the
//! remote source of truth, plus the search and notification stores the UI
//! binds to.

pub mod conversations;
pub mod entity_store;
pub mod filtered_files;
pub mod notification_center;
pub mod optimistic;
pub mod recent_repositories;

pub use conversations::{ConversationRemote, ConversationStore, conversation_store};
pub use entity_store::{EntityStore, InsertPosition};
pub use filtered_files::FilteredFiles;
pub use notification_center::{ActiveNotification, NotificationCenter};
pub use optimistic::{PendingRemoval, RemovalOutcome};
pub use recent_repositories::RecentRepositories;
