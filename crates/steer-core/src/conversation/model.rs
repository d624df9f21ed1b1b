use super::message::ChatMessageDto;
use crate::entity::Entity;
use crate::repository_option::RepositoryOption;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversation as retrieved from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDto {
    pub id: String,
    pub title: String,
    pub repository: RepositoryOption,
    #[serde(default)]
    pub messages: Vec<ChatMessageDto>,
    pub created_at: DateTime<Utc>,
}

/// Input used to start a new conversation with an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConversationDto {
    /// First user message.
    pub content: String,
    pub repository: RepositoryOption,
}

/// A conversation held in the conversations store.
///
/// Wraps the wire DTO; a refresh produces a new `Conversation` rather than
/// mutating an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    value: ConversationDto,
}

impl Conversation {
    pub fn new(value: ConversationDto) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &ConversationDto {
        &self.value
    }

    pub fn into_value(self) -> ConversationDto {
        self.value
    }

    pub fn id(&self) -> &str {
        &self.value.id
    }

    pub fn title(&self) -> &str {
        &self.value.title
    }

    pub fn last_message(&self) -> Option<&ChatMessageDto> {
        self.value.messages.last()
    }
}

impl From<ConversationDto> for Conversation {
    fn from(value: ConversationDto) -> Self {
        Self::new(value)
    }
}

impl Entity for Conversation {
    const ENTITY_TYPE: &'static str = "conversation";

    fn key(&self) -> &str {
        &self.value.id
    }

    fn display_name(&self) -> &str {
        &self.value.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": "c-1",
            "title": "Fix the parser",
            "repository": {"name": "steer", "url": "https://github.com/acme/steer"},
            "messages": [{
                "id": "m-1",
                "conversation_id": "c-1",
                "content": "hello",
                "role": "user",
                "created_at": "2024-05-01T10:00:00Z",
                "user_feedback": null
            }],
            "created_at": "2024-05-01T09:59:00Z"
        }"#;

        let conversation: Conversation = serde_json::from_str::<ConversationDto>(json)
            .unwrap()
            .into();

        assert_eq!(conversation.key(), "c-1");
        assert_eq!(conversation.display_name(), "Fix the parser");
        assert_eq!(conversation.value().repository.url, "https://github.com/acme/steer");
        assert_eq!(conversation.last_message().unwrap().content, "hello");
    }
}
