//! Conversation domain module.
//!
//! - `model`: `Conversation` entity and its wire DTOs
//! - `message`: chat message types

mod message;
mod model;

pub use message::{ChatMessageDto, MessageRole};
pub use model::{Conversation, ConversationDto, NewConversationDto};
