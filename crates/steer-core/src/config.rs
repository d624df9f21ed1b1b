//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every section falls
//! back to its defaults when omitted.

use crate::notification::{Notification, Position};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default capacity of the recent repositories list.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SteerConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub notifications: NotificationConfig,
    pub recent: RecentConfig,
    /// Overrides for the texts stores emit.
    pub messages: MessageOverrides,
}

impl Default for SteerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notifications: NotificationConfig::default(),
            recent: RecentConfig::default(),
            messages: MessageOverrides::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration_ms: u64,
    pub position: Position,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            position: Position::BottomRight,
        }
    }
}

impl NotificationConfig {
    /// Applies the configured duration and position to `notification`.
    pub fn apply(&self, notification: Notification) -> Notification {
        notification
            .with_display_duration(Duration::from_millis(self.duration_ms))
            .with_position(self.position)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RecentConfig {
    pub capacity: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

/// User-facing texts a store emits. `{name}` in `created` is replaced with
/// the new entity's display name.
///
/// The defaults name no entity kind; [`StoreMessages::conversations`] holds
/// the wording of the conversations store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreMessages {
    pub created: String,
    pub create_failed: String,
    pub deleted: String,
    pub delete_failed: String,
    pub fetch_failed: String,
    pub recent_fetch_failed: String,
}

impl Default for StoreMessages {
    fn default() -> Self {
        Self {
            created: "\"{name}\" created".to_string(),
            create_failed: "Failed to create item".to_string(),
            deleted: "Item deleted".to_string(),
            delete_failed: "Failed to delete item".to_string(),
            fetch_failed: "Failed to load items".to_string(),
            recent_fetch_failed: "Failed to fetch recent repositories".to_string(),
        }
    }
}

impl StoreMessages {
    /// Texts for the conversations store, where each conversation is an agent.
    pub fn conversations() -> Self {
        Self {
            created: "Agent \"{name}\" created".to_string(),
            create_failed: "Failed to create agent".to_string(),
            deleted: "Agent deleted".to_string(),
            delete_failed: "Failed to delete agent".to_string(),
            fetch_failed: "Failed to load conversations".to_string(),
            ..Self::default()
        }
    }

    pub fn created_for(&self, name: &str) -> String {
        self.created.replace("{name}", name)
    }
}

/// The `[messages]` section: any text set here replaces the store's own.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MessageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_failed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_failed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_failed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_fetch_failed: Option<String>,
}

impl MessageOverrides {
    /// Returns `base` with every configured text swapped in.
    pub fn apply(&self, base: StoreMessages) -> StoreMessages {
        let pick = |value: &Option<String>, fallback: String| value.clone().unwrap_or(fallback);
        StoreMessages {
            created: pick(&self.created, base.created),
            create_failed: pick(&self.create_failed, base.create_failed),
            deleted: pick(&self.deleted, base.deleted),
            delete_failed: pick(&self.delete_failed, base.delete_failed),
            fetch_failed: pick(&self.fetch_failed, base.fetch_failed),
            recent_fetch_failed: pick(&self.recent_fetch_failed, base.recent_fetch_failed),
        }
    }
}
