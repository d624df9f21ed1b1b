//! End-to-end store flows against the in-memory backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use steer_application::{NotificationCenter, RecentRepositories, RemovalOutcome, conversation_store};
use steer_core::config::SteerConfig;
use steer_core::conversation::NewConversationDto;
use steer_core::notification::{NotificationKind, NotificationSink};
use steer_core::reactive::Readable;
use steer_core::repository_option::RepositoryOption;
use steer_infrastructure::{
    InMemoryConversations, InMemoryRepositories, RemoteOperation, ScriptedFailure,
};

fn repo(name: &str) -> RepositoryOption {
    RepositoryOption::new(name, format!("https://github.com/acme/{name}"))
}

fn prompt(content: &str) -> NewConversationDto {
    NewConversationDto {
        content: content.to_string(),
        repository: repo("steer"),
    }
}

fn kinds(center: &NotificationCenter) -> Vec<NotificationKind> {
    center.active().iter().map(|n| n.notification.kind).collect()
}

#[tokio::test(start_paused = true)]
async fn test_conversation_lifecycle_with_notifications() {
    let remote = Arc::new(InMemoryConversations::conversations());
    let center = NotificationCenter::new();
    let notifier: Arc<dyn NotificationSink> = Arc::new(center.clone());
    let store = conversation_store(remote.clone(), notifier, &SteerConfig::default());

    let first = store.add(&prompt("Add a health check")).await.unwrap();
    let second = store.add(&prompt("Bump dependencies")).await.unwrap();
    assert_eq!(store.get().len(), 2);
    assert_eq!(kinds(&center), vec![NotificationKind::Success; 2]);
    assert_eq!(
        center.active()[0].notification.message,
        "Agent \"Add a health check\" created"
    );

    remote.fail_next(RemoteOperation::Delete, ScriptedFailure::Refuse);
    let outcome = store.remove_with_outcome(first.id()).await;
    assert_eq!(outcome, RemovalOutcome::RolledBack { restored: true });
    let order: Vec<String> = store.get().iter().map(|c| c.id().to_string()).collect();
    assert_eq!(order, vec![second.id().to_string(), first.id().to_string()]);

    assert!(store.remove(second.id()).await);
    assert!(remote.records().iter().all(|c| c.id != second.id()));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(center.active().is_empty());
}

#[tokio::test]
async fn test_fetch_all_then_live_view_tracks_refresh() {
    let remote = Arc::new(InMemoryConversations::conversations());
    let seeded = {
        let store = conversation_store(
            remote.clone(),
            Arc::new(NotificationCenter::new()),
            &SteerConfig::default(),
        );
        store.add(&prompt("Seed")).await.unwrap()
    };

    let store = conversation_store(
        remote.clone(),
        Arc::new(NotificationCenter::new()),
        &SteerConfig::default(),
    );
    store.fetch_all().await;
    assert_eq!(store.get().len(), 1);

    let view = store.get_by_id(seeded.id());
    let titles = Arc::new(Mutex::new(Vec::new()));
    let seen = titles.clone();
    let _subscription = view.subscribe(move |c| {
        seen.lock()
            .unwrap()
            .push(c.as_ref().map(|c| c.title().to_string()));
    });

    let mut renamed = remote.records().remove(0);
    renamed.title = "Renamed".to_string();
    remote.upsert(renamed);

    remote.fail_next(RemoteOperation::Get, ScriptedFailure::Error("flaky".to_string()));
    store.fetch_by_id(seeded.id()).await;
    assert_eq!(store.get()[0].title(), "Seed");

    store.fetch_by_id(seeded.id()).await;
    assert_eq!(store.get()[0].title(), "Renamed");
    assert_eq!(
        *titles.lock().unwrap(),
        vec![Some("Seed".to_string()), Some("Renamed".to_string())]
    );
}

#[tokio::test]
async fn test_recent_repositories_round_trip() {
    let remote = Arc::new(
        InMemoryRepositories::repositories()
            .with_records((0..12).map(|i| repo(&format!("r{i}"))).collect()),
    );
    let center = NotificationCenter::new();
    let recent = RecentRepositories::new(Arc::new(center.clone()))
        .with_config(&SteerConfig::default())
        .with_remote(remote.clone());

    recent.fetch_data().await;
    assert_eq!(recent.get().len(), 10);

    let chosen = recent.get()[3].clone();
    recent.set_selected(Some(&chosen));
    assert_eq!(recent.selected().get().map(|r| r.url), Some(chosen.url.clone()));

    remote.fail_next(RemoteOperation::List, ScriptedFailure::Error("offline".to_string()));
    recent.fetch_data().await;
    assert!(recent.get().is_empty());
    assert!(recent.selected().get().is_none());
    assert_eq!(kinds(&center), vec![NotificationKind::Error]);
}
