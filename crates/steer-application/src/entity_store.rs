//! Generic reactive entity store.
//!
//! Keeps an ordered, observable collection of entities consistent with a
//! [`RemoteCollection`]. Additions wait for the remote to assign identity;
//! removals are optimistic and roll back when the remote refuses them.
//! Failures are logged and reported through the notification sink, never
//! returned to the caller.

use crate::optimistic::{PendingRemoval, PendingRemovals, RemovalOutcome};
use std::sync::Arc;
use steer_core::config::{NotificationConfig, SteerConfig, StoreMessages};
use steer_core::entity::{Entity, find_by_key, position_of};
use steer_core::notification::{Notification, NotificationSink};
use steer_core::reactive::{Derived, Listener, Readable, Subscription, Writable, derived};
use steer_core::remote::RemoteCollection;

/// Where `add` places a newly created entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    Back,
    Front,
}

/// Reactive store over a remote collection.
///
/// Each mutating operation is expected to be driven from a single logical
/// task. Operations suspend only while awaiting the remote; any operation
/// that runs in the meantime sees the speculative state.
pub struct EntityStore<E, R>
where
    R: RemoteCollection,
    E: Entity + From<R::Raw>,
{
    items: Writable<Vec<E>>,
    remote: Arc<R>,
    notifier: Arc<dyn NotificationSink>,
    messages: StoreMessages,
    notification_config: NotificationConfig,
    insert_position: InsertPosition,
    pending: PendingRemovals<E>,
}

impl<E, R> EntityStore<E, R>
where
    R: RemoteCollection,
    E: Entity + From<R::Raw>,
{
    /// Creates an empty store.
    ///
    /// # Arguments
    ///
    /// * `remote` - The remote source of truth
    /// * `notifier` - Receives success/error notifications for mutations
    pub fn new(remote: Arc<R>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            items: Writable::new(Vec::new()),
            remote,
            notifier,
            messages: StoreMessages::default(),
            notification_config: NotificationConfig::default(),
            insert_position: InsertPosition::default(),
            pending: PendingRemovals::new(),
        }
    }

    /// Takes notification settings from `config`. Message texts stay the
    /// store's own; see [`EntityStore::with_messages`].
    pub fn with_config(mut self, config: &SteerConfig) -> Self {
        self.notification_config = config.notifications.clone();
        self
    }

    pub fn with_messages(mut self, messages: StoreMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_insert_position(mut self, position: InsertPosition) -> Self {
        self.insert_position = position;
        self
    }

    /// Handle to the underlying collection, for building derived views.
    pub fn items(&self) -> Writable<Vec<E>> {
        self.items.clone()
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> Vec<E> {
        self.items.get()
    }

    /// Registers a listener for the collection; see [`Readable::subscribe`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<E>) + Send + Sync + 'static,
    {
        self.items.subscribe(listener)
    }

    /// Removals applied locally whose remote delete has not resolved yet.
    pub fn pending_removals(&self) -> Vec<PendingRemoval<E>> {
        self.pending.snapshot()
    }

    /// Whether a removal of `id` is in flight.
    pub fn is_removal_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Creates an entity remotely and adds it to the collection.
    ///
    /// Nothing changes locally until the remote answers.
    ///
    /// # Returns
    ///
    /// - `Some(entity)`: Created and added
    /// - `None`: The remote failed; an error notification was emitted
    pub async fn add(&self, input: &R::NewInput) -> Option<E> {
        tracing::debug!(entity = E::ENTITY_TYPE, "EntityStore::add");

        let raw = match self.remote.create(input).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(entity = E::ENTITY_TYPE, error = %e, "Remote create failed");
                self.notify(Notification::error(self.messages.create_failed.clone()));
                return None;
            }
        };

        let entity = E::from(raw);
        let added = entity.clone();
        let insert_position = self.insert_position;
        self.items.update(move |items| {
            // The remote is the source of truth for identity: a key we
            // already hold is refreshed rather than duplicated.
            if let Some(index) = position_of(items, added.key()) {
                items[index] = added;
                return;
            }
            match insert_position {
                InsertPosition::Back => items.push(added),
                InsertPosition::Front => items.insert(0, added),
            }
        });

        self.notify(Notification::success(
            self.messages.created_for(entity.display_name()),
        ));
        Some(entity)
    }

    /// Optimistically removes the entity with `id`.
    ///
    /// Returns `false` without contacting the remote when no such entity is
    /// held. Otherwise returns the remote outcome.
    pub async fn remove(&self, id: &str) -> bool {
        self.remove_with_outcome(id).await.is_committed()
    }

    /// Like [`EntityStore::remove`], reporting which path the removal took.
    pub async fn remove_with_outcome(&self, id: &str) -> RemovalOutcome {
        tracing::debug!(entity = E::ENTITY_TYPE, id, "EntityStore::remove");

        // Phase 1: speculative apply
        let mut removed = None;
        self.items.update_if(|items| match position_of(items, id) {
            Some(index) => {
                removed = Some((index, items.remove(index)));
                true
            }
            None => false,
        });
        let Some((index, entity)) = removed else {
            return RemovalOutcome::Absent;
        };
        let ticket = self.pending.begin(id, entity, index);

        // Phase 2: remote confirmation
        let confirmed = match self.remote.delete(id).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(entity = E::ENTITY_TYPE, id, "Remote refused delete");
                false
            }
            Err(e) => {
                tracing::error!(entity = E::ENTITY_TYPE, id, error = %e, "Remote delete failed");
                false
            }
        };

        // Phase 3: commit or rollback
        let Some(pending) = self.pending.resolve(ticket) else {
            tracing::error!(ticket, "Pending removal vanished before resolution");
            return if confirmed {
                RemovalOutcome::Committed
            } else {
                RemovalOutcome::RolledBack { restored: false }
            };
        };

        if confirmed {
            self.notify(Notification::success(self.messages.deleted.clone()));
            return RemovalOutcome::Committed;
        }

        let restored = self.rollback(pending.entity);
        self.notify(Notification::error(self.messages.delete_failed.clone()));
        RemovalOutcome::RolledBack { restored }
    }

    /// Re-appends `entity` unless its key is already back in the collection.
    fn rollback(&self, entity: E) -> bool {
        let restored = self.items.update_if(|items| {
            if position_of(items, entity.key()).is_some() {
                return false;
            }
            items.push(entity);
            true
        });
        if !restored {
            tracing::warn!(
                entity = E::ENTITY_TYPE,
                "Rollback skipped: entity with the same key already present"
            );
        }
        restored
    }

    /// Replaces the whole collection with the remote list.
    ///
    /// On failure the collection is left unchanged and an error
    /// notification is emitted.
    pub async fn fetch_all(&self) {
        tracing::debug!(entity = E::ENTITY_TYPE, "EntityStore::fetch_all");

        let raws = match self.remote.list().await {
            Ok(raws) => raws,
            Err(e) => {
                tracing::error!(entity = E::ENTITY_TYPE, error = %e, "Remote list failed");
                self.notify(Notification::error(self.messages.fetch_failed.clone()));
                return;
            }
        };

        let mut fetched: Vec<E> = Vec::with_capacity(raws.len());
        for entity in raws.into_iter().map(E::from) {
            if position_of(&fetched, entity.key()).is_some() {
                tracing::warn!(
                    entity = E::ENTITY_TYPE,
                    key = entity.key(),
                    "Duplicate key in remote list, keeping first"
                );
                continue;
            }
            fetched.push(entity);
        }
        self.items.set(fetched);
    }

    /// Refreshes the entity with `id` in place.
    ///
    /// Only entries already in the collection are refreshed; a fetched
    /// entity with no local counterpart is dropped. Not-found is logged and
    /// leaves the collection unchanged without notifying the user.
    pub async fn fetch_by_id(&self, id: &str) {
        tracing::debug!(entity = E::ENTITY_TYPE, id, "EntityStore::fetch_by_id");

        let raw = match self.remote.get(id).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::error!(entity = E::ENTITY_TYPE, id, "Entity not found on remote");
                return;
            }
            Err(e) => {
                tracing::error!(entity = E::ENTITY_TYPE, id, error = %e, "Remote get failed");
                return;
            }
        };

        let fresh = E::from(raw);
        let refreshed = self.items.update_if(move |items| match position_of(items, id) {
            Some(index) => {
                items[index] = fresh;
                true
            }
            None => false,
        });
        if !refreshed {
            tracing::debug!(entity = E::ENTITY_TYPE, id, "Fetched entity not held locally, dropped");
        }
    }

    /// Live view of the entity with `id`, or `None` while it is absent.
    pub fn get_by_id(&self, id: impl Into<String>) -> Derived<Vec<E>, Option<E>> {
        let id = id.into();
        tracing::debug!(entity = E::ENTITY_TYPE, id = %id, "EntityStore::get_by_id");
        derived(self.items.clone(), move |items: &Vec<E>| {
            find_by_key(items, &id).cloned()
        })
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(self.notification_config.apply(notification));
    }
}

impl<E, R> Readable<Vec<E>> for EntityStore<E, R>
where
    R: RemoteCollection,
    E: Entity + From<R::Raw>,
{
    fn get(&self) -> Vec<E> {
        self.items.get()
    }

    fn subscribe_listener(&self, listener: Listener<Vec<E>>) -> Subscription {
        self.items.subscribe_listener(listener)
    }
}
