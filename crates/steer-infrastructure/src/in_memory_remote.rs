//! In-memory remote collections.
//!
//! Stand-ins for the HTTP backend, used by unit and integration tests.
//! Failures can be scripted per operation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use steer_core::conversation::{ChatMessageDto, ConversationDto, MessageRole, NewConversationDto};
use steer_core::remote::RemoteCollection;
use steer_core::repository_option::RepositoryOption;
use steer_core::{Result, SteerError};
use uuid::Uuid;

const TITLE_MAX_CHARS: usize = 50;

/// A remote operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    Create,
    Delete,
    List,
    Get,
}

/// How a scripted failure manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// The call returns `Err(SteerError::Remote)`.
    Error(String),
    /// `delete` answers `Ok(false)`; other operations treat it as an error.
    Refuse,
}

type KeyFn<Raw> = fn(&Raw) -> String;
type BuildFn<Raw, New> = Box<dyn Fn(&New) -> Raw + Send + Sync>;

/// A `RemoteCollection` backed by a vector.
pub struct InMemoryRemote<Raw, New> {
    records: Mutex<Vec<Raw>>,
    failures: Mutex<HashMap<RemoteOperation, Vec<ScriptedFailure>>>,
    key_of: KeyFn<Raw>,
    build: BuildFn<Raw, New>,
}

impl<Raw, New> InMemoryRemote<Raw, New>
where
    Raw: Clone + Send + Sync + 'static,
    New: Send + Sync,
{
    pub fn new(
        key_of: KeyFn<Raw>,
        build: impl Fn(&New) -> Raw + Send + Sync + 'static,
    ) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            key_of,
            build: Box::new(build),
        }
    }

    /// Replaces the stored records.
    pub fn with_records(self, records: Vec<Raw>) -> Self {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records;
        self
    }

    /// Makes the next call of `operation` fail.
    ///
    /// Failures queue up; each call consumes one.
    pub fn fail_next(&self, operation: RemoteOperation, failure: ScriptedFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(operation)
            .or_default()
            .push(failure);
    }

    /// Current remote records.
    pub fn records(&self) -> Vec<Raw> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `record`, replacing any record with the same key.
    pub fn upsert(&self, record: Raw) {
        let key = (self.key_of)(&record);
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        match records.iter().position(|r| (self.key_of)(r) == key) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
    }

    fn take_failure(&self, operation: RemoteOperation) -> Option<ScriptedFailure> {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let queue = failures.get_mut(&operation)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    fn check(&self, operation: RemoteOperation) -> Result<()> {
        match self.take_failure(operation) {
            None => Ok(()),
            Some(ScriptedFailure::Error(message)) => Err(SteerError::remote(message)),
            Some(ScriptedFailure::Refuse) => Err(SteerError::remote(format!(
                "{operation:?} refused"
            ))),
        }
    }
}

#[async_trait]
impl<Raw, New> RemoteCollection for InMemoryRemote<Raw, New>
where
    Raw: Clone + Send + Sync + 'static,
    New: Send + Sync,
{
    type Raw = Raw;
    type NewInput = New;

    async fn create(&self, input: &New) -> Result<Raw> {
        self.check(RemoteOperation::Create)?;
        let record = (self.build)(input);
        self.upsert(record.clone());
        tracing::debug!(key = %(self.key_of)(&record), "In-memory remote created record");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self.take_failure(RemoteOperation::Delete) {
            Some(ScriptedFailure::Refuse) => return Ok(false),
            Some(ScriptedFailure::Error(message)) => return Err(SteerError::remote(message)),
            None => {}
        }
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|r| (self.key_of)(r) != id);
        Ok(records.len() != before)
    }

    async fn list(&self) -> Result<Vec<Raw>> {
        self.check(RemoteOperation::List)?;
        Ok(self.records())
    }

    async fn get(&self, id: &str) -> Result<Option<Raw>> {
        self.check(RemoteOperation::Get)?;
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.iter().find(|r| (self.key_of)(r) == id).cloned())
    }
}

/// In-memory conversations backend.
pub type InMemoryConversations = InMemoryRemote<ConversationDto, NewConversationDto>;

/// In-memory recent repositories backend.
pub type InMemoryRepositories = InMemoryRemote<RepositoryOption, RepositoryOption>;

impl InMemoryConversations {
    /// Creates a backend that assigns UUID ids and seeds each conversation
    /// with the first user message.
    pub fn conversations() -> Self {
        Self::new(|c: &ConversationDto| c.id.clone(), new_conversation)
    }
}

impl InMemoryRepositories {
    /// Creates a backend that stores repository options as given.
    pub fn repositories() -> Self {
        Self::new(|r: &RepositoryOption| r.url.clone(), RepositoryOption::clone)
    }
}

fn new_conversation(input: &NewConversationDto) -> ConversationDto {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let title = conversation_title(&input.content);
    let first_message = ChatMessageDto {
        id: Uuid::new_v4().to_string(),
        conversation_id: id.clone(),
        content: input.content.clone(),
        role: MessageRole::User,
        created_at: now,
        user_feedback: None,
    };
    ConversationDto {
        id,
        title,
        repository: input.repository.clone(),
        messages: vec![first_message],
        created_at: now,
    }
}

/// First line of the prompt, cut to a readable length.
fn conversation_title(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return "Untitled".to_string();
    }
    let mut title: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    if first_line.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(url: &str) -> RepositoryOption {
        RepositoryOption::new(url.trim_start_matches("https://"), url)
    }

    #[tokio::test]
    async fn test_create_assigns_uuid_and_title() {
        let remote = InMemoryConversations::conversations();
        let created = remote
            .create(&NewConversationDto {
                content: "Fix the login bug\nIt crashes on submit".to_string(),
                repository: repo("https://a"),
            })
            .await
            .unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.title, "Fix the login bug");
        assert_eq!(created.messages.len(), 1);
        assert_eq!(created.messages[0].conversation_id, created.id);
        assert_eq!(remote.records().len(), 1);
    }

    #[test]
    fn test_long_titles_are_cut() {
        let title = conversation_title(&"x".repeat(80));
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert_eq!(conversation_title("   "), "Untitled");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_removed() {
        let remote = InMemoryRepositories::repositories().with_records(vec![repo("https://a")]);

        assert!(remote.delete("https://a").await.unwrap());
        assert!(!remote.delete("https://a").await.unwrap());
    }

    #[tokio::test]
    async fn test_scripted_failures_are_consumed_in_order() {
        let remote = InMemoryRepositories::repositories().with_records(vec![repo("https://a")]);
        remote.fail_next(RemoteOperation::Delete, ScriptedFailure::Refuse);
        remote.fail_next(
            RemoteOperation::Delete,
            ScriptedFailure::Error("boom".to_string()),
        );

        assert!(!remote.delete("https://a").await.unwrap());
        assert!(remote.delete("https://a").await.unwrap_err().is_remote());
        assert!(remote.delete("https://a").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let remote = InMemoryRepositories::repositories()
            .with_records(vec![repo("https://a"), repo("https://b")]);
        remote.fail_next(RemoteOperation::List, ScriptedFailure::Error("down".to_string()));

        assert!(remote.list().await.is_err());
        assert_eq!(remote.list().await.unwrap().len(), 2);
        assert_eq!(
            remote.get("https://b").await.unwrap().map(|r| r.url),
            Some("https://b".to_string())
        );
        assert!(remote.get("https://z").await.unwrap().is_none());
    }
}
