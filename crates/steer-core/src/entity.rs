//! The entity contract shared by every store.

/// A uniquely-keyed domain record held in a collection.
///
/// The key is the natural identity the store deduplicates on: the `id` of a
/// conversation, the `url` of a repository option.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in logs and `NotFound` errors.
    const ENTITY_TYPE: &'static str;

    /// Returns the stable unique key.
    fn key(&self) -> &str;

    /// Human readable name, used in notification templates.
    fn display_name(&self) -> &str {
        self.key()
    }
}

/// Returns the index of the entity with the given key.
pub fn position_of<E: Entity>(items: &[E], key: &str) -> Option<usize> {
    items.iter().position(|item| item.key() == key)
}

/// Returns the entity with the given key, if any.
pub fn find_by_key<'a, E: Entity>(items: &'a [E], key: &str) -> Option<&'a E> {
    items.iter().find(|item| item.key() == key)
}
