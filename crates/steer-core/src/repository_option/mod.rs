//! Repository options offered when starting a conversation.

mod extensions;
mod model;

pub use extensions::{Extensions, MAX_EXTENSIONS};
pub use model::RepositoryOption;
