//! Bounded most-recently-used list of repositories.

use std::sync::Arc;
use steer_core::config::{DEFAULT_RECENT_CAPACITY, NotificationConfig, SteerConfig, StoreMessages};
use steer_core::entity::position_of;
use steer_core::notification::{Notification, NotificationSink};
use steer_core::reactive::{Derived, Listener, Readable, Subscription, Writable, derived};
use steer_core::remote::RemoteCollection;
use steer_core::repository_option::RepositoryOption;

/// Remote collaborator serving the user's recent repositories.
pub type RecentRepositoriesRemote =
    dyn RemoteCollection<Raw = RepositoryOption, NewInput = RepositoryOption>;

/// Most-recently-used-first list of repositories, capped at `capacity`.
///
/// Keyed by url. At most one entry is selected at a time.
pub struct RecentRepositories {
    items: Writable<Vec<RepositoryOption>>,
    capacity: usize,
    remote: Option<Arc<RecentRepositoriesRemote>>,
    notifier: Arc<dyn NotificationSink>,
    messages: StoreMessages,
    notification_config: NotificationConfig,
}

impl RecentRepositories {
    /// Creates an empty list with the default capacity of 10.
    pub fn new(notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            items: Writable::new(Vec::new()),
            capacity: DEFAULT_RECENT_CAPACITY,
            remote: None,
            notifier,
            messages: StoreMessages::default(),
            notification_config: NotificationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: &SteerConfig) -> Self {
        self.capacity = config.recent.capacity.max(1);
        self.messages = config.messages.apply(StoreMessages::default());
        self.notification_config = config.notifications.clone();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn with_remote(mut self, remote: Arc<RecentRepositoriesRemote>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn snapshot(&self) -> Vec<RepositoryOption> {
        self.items.get()
    }

    pub fn items(&self) -> Writable<Vec<RepositoryOption>> {
        self.items.clone()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<RepositoryOption>) + Send + Sync + 'static,
    {
        self.items.subscribe(listener)
    }

    /// Records `item` as most recently used.
    ///
    /// A url already in the list moves to the front keeping its stored
    /// value; `item` itself is discarded. A new url is inserted at the front,
    /// evicting the last entry first when the list is full.
    pub fn add(&self, item: RepositoryOption) {
        tracing::debug!(url = %item.url, "RecentRepositories::add");
        let capacity = self.capacity;
        self.items.update(move |items| {
            let front = match position_of(items, &item.url) {
                Some(index) => items.remove(index),
                None => {
                    while items.len() >= capacity {
                        if let Some(evicted) = items.pop() {
                            tracing::debug!(url = %evicted.url, "Evicted least recently used repository");
                        }
                    }
                    item
                }
            };
            items.insert(0, front);
        });
    }

    /// Removes the entry with `url`. Returns whether one was removed.
    pub fn remove(&self, url: &str) -> bool {
        tracing::debug!(url, "RecentRepositories::remove");
        self.items.update_if(|items| match position_of(items, url) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        })
    }

    /// Replaces the list.
    ///
    /// Duplicate urls keep their first occurrence, only the first selected
    /// entry stays selected, and the list is truncated to capacity.
    pub fn set(&self, items: Vec<RepositoryOption>) {
        self.items.set(normalize(items, self.capacity));
    }

    /// Loads the list from the remote.
    ///
    /// On failure the list is emptied and an error notification is emitted.
    pub async fn fetch_data(&self) {
        tracing::debug!("RecentRepositories::fetch_data");
        let Some(remote) = &self.remote else {
            tracing::debug!("No remote configured for recent repositories");
            return;
        };

        match remote.list().await {
            Ok(items) => self.set(items),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch recent repositories");
                self.set(Vec::new());
                self.notifier.notify(
                    self.notification_config
                        .apply(Notification::error(self.messages.recent_fetch_failed.clone())),
                );
            }
        }
    }

    /// Overwrites the description of the entry matching `repo`.
    ///
    /// Writing the current value again is suppressed, so subscribers are not
    /// notified. Returns whether anything changed.
    pub fn change_description(&self, repo: Option<&RepositoryOption>, description: &str) -> bool {
        let Some(repo) = repo else {
            return false;
        };
        self.items.update_if(|items| {
            let Some(item) = items.iter_mut().find(|i| i.url == repo.url) else {
                return false;
            };
            if item.description.as_deref() == Some(description) {
                return false;
            }
            item.description = Some(description.to_string());
            true
        })
    }

    /// Clears every selection, then selects the entry matching `repo`.
    pub fn set_selected(&self, repo: Option<&RepositoryOption>) {
        let url = repo.map(|r| r.url.clone());
        self.items.update(move |items| {
            for item in items.iter_mut() {
                item.selected = url.as_deref() == Some(item.url.as_str());
            }
        });
    }

    /// Live view of the selected repository.
    pub fn selected(&self) -> Derived<Vec<RepositoryOption>, Option<RepositoryOption>> {
        derived(self.items.clone(), |items: &Vec<RepositoryOption>| {
            items.iter().find(|item| item.selected).cloned()
        })
    }
}

impl Readable<Vec<RepositoryOption>> for RecentRepositories {
    fn get(&self) -> Vec<RepositoryOption> {
        self.items.get()
    }

    fn subscribe_listener(&self, listener: Listener<Vec<RepositoryOption>>) -> Subscription {
        self.items.subscribe_listener(listener)
    }
}

fn normalize(items: Vec<RepositoryOption>, capacity: usize) -> Vec<RepositoryOption> {
    let mut out: Vec<RepositoryOption> = Vec::with_capacity(items.len().min(capacity));
    let mut seen_selected = false;
    for mut item in items {
        if position_of(&out, &item.url).is_some() {
            continue;
        }
        if item.selected {
            item.selected = !seen_selected;
            seen_selected = true;
        }
        out.push(item);
    }
    if out.len() > capacity {
        tracing::warn!(
            dropped = out.len() - capacity,
            "Recent repositories exceed capacity, truncating"
        );
        out.truncate(capacity);
    }
    out
}
