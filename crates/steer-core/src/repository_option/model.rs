use super::extensions::Extensions;
use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// A repository the user can point an agent at.
///
/// Keyed by `url`. At most one option in a collection carries
/// `selected = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOption {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub selected: bool,
    /// Backend metadata without a dedicated field.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl RepositoryOption {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            version: None,
            description: None,
            selected: false,
            extensions: Extensions::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Entity for RepositoryOption {
    const ENTITY_TYPE: &'static str = "repository";

    fn key(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
