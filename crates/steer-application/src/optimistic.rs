//! Bookkeeping for optimistic removals.
//!
//! A removal runs in three phases: the entity leaves the local collection
//! (speculative apply), the remote delete is awaited, then the removal is
//! committed or rolled back. Between phase one and three the removal is
//! recorded here so the speculative window can be observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A removal that has been applied locally but not yet confirmed remotely.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRemoval<E> {
    /// Monotonically increasing per store.
    pub ticket: u64,
    pub key: String,
    /// The entity as it was when removed; restored on rollback.
    pub entity: E,
    /// Index the entity occupied before removal.
    pub index: usize,
}

/// How a removal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Nothing with that key was present; no remote call was made.
    Absent,
    /// The remote confirmed the delete.
    Committed,
    /// The remote failed; `restored` is false when an entity with the same
    /// key had already reappeared and the saved copy was discarded.
    RolledBack { restored: bool },
}

impl RemovalOutcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

pub(crate) struct PendingRemovals<E> {
    next_ticket: AtomicU64,
    entries: Mutex<Vec<PendingRemoval<E>>>,
}

impl<E: Clone> PendingRemovals<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_ticket: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Phase one: records the speculative removal and returns its ticket.
    pub(crate) fn begin(&self, key: &str, entity: E, index: usize) -> u64 {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.lock().push(PendingRemoval {
            ticket,
            key: key.to_string(),
            entity,
            index,
        });
        ticket
    }

    /// Phase three: removes and returns the record for `ticket`.
    pub(crate) fn resolve(&self, ticket: u64) -> Option<PendingRemoval<E>> {
        let mut entries = self.lock();
        let index = entries.iter().position(|p| p.ticket == ticket)?;
        Some(entries.remove(index))
    }

    pub(crate) fn snapshot(&self) -> Vec<PendingRemoval<E>> {
        self.lock().clone()
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.lock().iter().any(|p| p.key == key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PendingRemoval<E>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
