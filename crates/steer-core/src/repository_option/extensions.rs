use crate::error::{Result, SteerError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum number of free-form metadata entries a repository option may carry.
pub const MAX_EXTENSIONS: usize = 32;

/// Field names owned by `RepositoryOption` itself.
const RESERVED_KEYS: &[&str] = &["name", "url", "version", "selected", "description"];

/// Bounded key/value bag for backend metadata that has no dedicated field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, Value>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts or replaces an entry.
    ///
    /// # Errors
    ///
    /// Returns `SteerError::Validation` if `key` names a dedicated field or if
    /// a new key would exceed [`MAX_EXTENSIONS`].
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(SteerError::validation(format!(
                "'{key}' is a reserved repository field"
            )));
        }
        if !self.0.contains_key(&key) && self.0.len() >= MAX_EXTENSIONS {
            return Err(SteerError::validation(format!(
                "repository metadata is limited to {MAX_EXTENSIONS} entries"
            )));
        }
        Ok(self.0.insert(key, value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, Value>::deserialize(deserializer)?;
        if map.len() > MAX_EXTENSIONS {
            return Err(serde::de::Error::custom(format!(
                "repository metadata is limited to {MAX_EXTENSIONS} entries, got {}",
                map.len()
            )));
        }
        Ok(Self(map))
    }
}
