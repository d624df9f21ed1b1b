//! Conversations store.

use crate::entity_store::EntityStore;
use std::sync::Arc;
use steer_core::config::{SteerConfig, StoreMessages};
use steer_core::conversation::{Conversation, ConversationDto, NewConversationDto};
use steer_core::notification::NotificationSink;
use steer_core::remote::RemoteCollection;

/// Remote collaborator serving conversations.
pub trait ConversationRemote:
    RemoteCollection<Raw = ConversationDto, NewInput = NewConversationDto>
{
}

impl<T> ConversationRemote for T where
    T: RemoteCollection<Raw = ConversationDto, NewInput = NewConversationDto>
{
}

/// Store of the user's agent conversations. New conversations are appended.
pub type ConversationStore<R> = EntityStore<Conversation, R>;

/// Builds a conversations store configured from `config`.
pub fn conversation_store<R: ConversationRemote>(
    remote: Arc<R>,
    notifier: Arc<dyn NotificationSink>,
    config: &SteerConfig,
) -> ConversationStore<R> {
    EntityStore::new(remote, notifier)
        .with_config(config)
        .with_messages(config.messages.apply(StoreMessages::conversations()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimistic::RemovalOutcome;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use steer_core::entity::Entity;
    use steer_core::notification::{Notification, NotificationKind};
    use steer_core::reactive::Readable;
    use steer_core::repository_option::RepositoryOption;
    use steer_core::{Result, SteerError};

    fn dto(id: &str, title: &str) -> ConversationDto {
        ConversationDto {
            id: id.to_string(),
            title: title.to_string(),
            repository: RepositoryOption::new("steer", "https://github.com/acme/steer"),
            messages: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn new_input(content: &str) -> NewConversationDto {
        NewConversationDto {
            content: content.to_string(),
            repository: RepositoryOption::new("steer", "https://github.com/acme/steer"),
        }
    }

    // Scripted remote: each call pops the next scripted answer.
    #[derive(Default)]
    struct MockRemote {
        creates: Mutex<VecDeque<Result<ConversationDto>>>,
        deletes: Mutex<VecDeque<Result<bool>>>,
        lists: Mutex<VecDeque<Result<Vec<ConversationDto>>>>,
        gets: Mutex<VecDeque<Result<Option<ConversationDto>>>>,
        delete_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RemoteCollection for MockRemote {
        type Raw = ConversationDto;
        type NewInput = NewConversationDto;

        async fn create(&self, _input: &NewConversationDto) -> Result<ConversationDto> {
            self.creates.lock().unwrap().pop_front().unwrap()
        }

        async fn delete(&self, id: &str) -> Result<bool> {
            self.delete_calls.lock().unwrap().push(id.to_string());
            self.deletes.lock().unwrap().pop_front().unwrap()
        }

        async fn list(&self) -> Result<Vec<ConversationDto>> {
            self.lists.lock().unwrap().pop_front().unwrap()
        }

        async fn get(&self, _id: &str) -> Result<Option<ConversationDto>> {
            self.gets.lock().unwrap().pop_front().unwrap()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    impl RecordingSink {
        fn kinds(&self) -> Vec<NotificationKind> {
            self.seen.lock().unwrap().iter().map(|n| n.kind).collect()
        }
    }

    fn setup() -> (Arc<MockRemote>, Arc<RecordingSink>, ConversationStore<MockRemote>) {
        let remote = Arc::new(MockRemote::default());
        let sink = Arc::new(RecordingSink::default());
        let store = conversation_store(remote.clone(), sink.clone(), &SteerConfig::default());
        (remote, sink, store)
    }

    fn ids(store: &ConversationStore<MockRemote>) -> Vec<String> {
        store.snapshot().iter().map(|c| c.key().to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_appends_and_notifies_with_title() {
        let (remote, sink, store) = setup();
        remote.lists.lock().unwrap().push_back(Ok(vec![dto("a", "A")]));
        store.fetch_all().await;
        remote.creates.lock().unwrap().push_back(Ok(dto("b", "Refactor")));

        let added = store.add(&new_input("hi")).await.unwrap();

        assert_eq!(added.key(), "b");
        assert_eq!(ids(&store), vec!["a", "b"]);
        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Success);
        assert_eq!(seen[0].message, "Agent \"Refactor\" created");
    }

    #[tokio::test]
    async fn test_add_failure_leaves_collection_untouched() {
        let (remote, sink, store) = setup();
        remote
            .creates
            .lock()
            .unwrap()
            .push_back(Err(SteerError::remote("500")));

        assert!(store.add(&new_input("hi")).await.is_none());
        assert!(store.snapshot().is_empty());
        assert_eq!(sink.kinds(), vec![NotificationKind::Error]);
    }

    #[tokio::test]
    async fn test_remove_absent_is_silent_noop() {
        let (remote, sink, store) = setup();
        let notified = Arc::new(Mutex::new(0));
        let counter = notified.clone();
        let _sub = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        assert!(!store.remove("missing").await);

        assert!(remote.delete_calls.lock().unwrap().is_empty());
        assert!(sink.kinds().is_empty());
        // Only the initial subscription call.
        assert_eq!(*notified.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_success_commits() {
        let (remote, sink, store) = setup();
        remote
            .lists
            .lock()
            .unwrap()
            .push_back(Ok(vec![dto("a", "A"), dto("b", "B")]));
        store.fetch_all().await;
        remote.deletes.lock().unwrap().push_back(Ok(true));

        assert!(store.remove("a").await);

        assert_eq!(ids(&store), vec!["b"]);
        assert!(store.pending_removals().is_empty());
        assert_eq!(sink.kinds(), vec![NotificationKind::Success]);
    }

    #[tokio::test]
    async fn test_failed_remove_rolls_back_to_end() {
        let (remote, sink, store) = setup();
        remote
            .lists
            .lock()
            .unwrap()
            .push_back(Ok(vec![dto("a", "A"), dto("b", "B"), dto("c", "C")]));
        store.fetch_all().await;
        remote.deletes.lock().unwrap().push_back(Ok(false));

        let outcome = store.remove_with_outcome("a").await;

        assert_eq!(outcome, RemovalOutcome::RolledBack { restored: true });
        assert_eq!(ids(&store), vec!["b", "c", "a"]);
        assert_eq!(store.snapshot()[2].title(), "A");
        assert_eq!(sink.kinds(), vec![NotificationKind::Error]);
    }

    #[tokio::test]
    async fn test_remote_error_on_delete_is_rollback() {
        let (remote, _sink, store) = setup();
        remote.lists.lock().unwrap().push_back(Ok(vec![dto("a", "A")]));
        store.fetch_all().await;
        remote
            .deletes
            .lock()
            .unwrap()
            .push_back(Err(SteerError::remote("timeout")));

        assert!(!store.remove("a").await);
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[tokio::test]
    async fn test_fetch_all_overwrites() {
        let (remote, _sink, store) = setup();
        remote.lists.lock().unwrap().push_back(Ok(vec![dto("a", "A")]));
        remote
            .lists
            .lock()
            .unwrap()
            .push_back(Ok(vec![dto("x", "X"), dto("y", "Y"), dto("x", "dup")]));

        store.fetch_all().await;
        store.fetch_all().await;

        assert_eq!(ids(&store), vec!["x", "y"]);
        assert_eq!(store.snapshot()[0].title(), "X");
    }

    #[tokio::test]
    async fn test_fetch_all_failure_keeps_state() {
        let (remote, sink, store) = setup();
        remote.lists.lock().unwrap().push_back(Ok(vec![dto("a", "A")]));
        remote
            .lists
            .lock()
            .unwrap()
            .push_back(Err(SteerError::remote("offline")));

        store.fetch_all().await;
        store.fetch_all().await;

        assert_eq!(ids(&store), vec!["a"]);
        assert_eq!(sink.kinds(), vec![NotificationKind::Error]);
    }

    #[tokio::test]
    async fn test_fetch_by_id_refreshes_in_place_only() {
        let (remote, sink, store) = setup();
        remote
            .lists
            .lock()
            .unwrap()
            .push_back(Ok(vec![dto("a", "A"), dto("b", "B")]));
        store.fetch_all().await;

        remote.gets.lock().unwrap().push_back(Ok(Some(dto("a", "A2"))));
        store.fetch_by_id("a").await;
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.snapshot()[0].title(), "A2");

        remote.gets.lock().unwrap().push_back(Ok(Some(dto("z", "Z"))));
        store.fetch_by_id("z").await;
        assert_eq!(ids(&store), vec!["a", "b"]);

        remote.gets.lock().unwrap().push_back(Ok(None));
        store.fetch_by_id("b").await;
        assert_eq!(store.snapshot()[1].title(), "B");
        assert!(sink.kinds().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_is_live() {
        let (remote, _sink, store) = setup();
        let view = store.get_by_id("b");
        assert!(view.get().is_none());

        remote.lists.lock().unwrap().push_back(Ok(vec![dto("b", "B")]));
        store.fetch_all().await;
        assert_eq!(view.get().unwrap().title(), "B");

        remote.deletes.lock().unwrap().push_back(Ok(true));
        store.remove("b").await;
        assert!(view.get().is_none());
    }

    #[tokio::test]
    async fn test_configured_notification_settings_applied() {
        let remote = Arc::new(MockRemote::default());
        let sink = Arc::new(RecordingSink::default());
        let mut config = SteerConfig::default();
        config.notifications.duration_ms = 1200;
        config.messages.create_failed = Some("nope".to_string());
        let store = conversation_store(remote.clone(), sink.clone(), &config);
        remote
            .creates
            .lock()
            .unwrap()
            .push_back(Err(SteerError::remote("500")));

        store.add(&new_input("hi")).await;

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen[0].message, "nope");
        assert_eq!(seen[0].display_duration.as_millis(), 1200);
    }
}
