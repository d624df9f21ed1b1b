//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System-generated message.
    System,
    /// Message from the user.
    User,
    /// Message from the coding agent.
    Assistant,
}

/// A single message in a conversation, as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    pub conversation_id: String,
    pub content: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
    /// Thumbs-up/down style feedback left by the user, if any.
    #[serde(default)]
    pub user_feedback: Option<String>,
}
