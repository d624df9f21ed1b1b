use super::{Listener, Readable, Subscription};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

struct Inner<T> {
    value: Mutex<T>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_listener_id: AtomicU64,
    watch_tx: watch::Sender<T>,
}

/// A mutable container broadcasting immutable snapshots to its listeners.
///
/// Cloning a `Writable` yields another handle to the same container.
pub struct Writable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Writable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a container holding `initial`.
    pub fn new(initial: T) -> Self {
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                watch_tx,
            }),
        }
    }

    /// Replaces the value and notifies listeners.
    pub fn set(&self, value: T) {
        let snapshot = {
            let mut guard = self.lock_value();
            *guard = value;
            guard.clone()
        };
        self.emit(snapshot);
    }

    /// Mutates the value in place and notifies listeners.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut guard = self.lock_value();
            f(&mut guard);
            guard.clone()
        };
        self.emit(snapshot);
    }

    /// Mutates the value in place, notifying listeners only when `f` reports
    /// a change. Returns what `f` returned.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let snapshot = {
            let mut guard = self.lock_value();
            if !f(&mut guard) {
                return false;
            }
            guard.clone()
        };
        self.emit(snapshot);
        true
    }

    /// Returns a `watch` receiver tracking the value, for async consumers.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.inner.watch_tx.subscribe()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    fn lock_value(&self) -> std::sync::MutexGuard<'_, T> {
        self.inner.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Listener<T>)>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Listeners run outside both locks so they may read or write this
    // container themselves.
    fn emit(&self, snapshot: T) {
        let listeners: Vec<Listener<T>> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
        self.inner.watch_tx.send_replace(snapshot);
    }
}

impl<T> Readable<T> for Writable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self) -> T {
        self.lock_value().clone()
    }

    fn subscribe_listener(&self, listener: Listener<T>) -> Subscription {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, Arc::clone(&listener)));

        let current = self.get();
        listener(&current);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}

impl<T> Default for Writable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Writable<T>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
