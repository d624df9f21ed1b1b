use super::{Listener, Readable, Subscription};
use std::sync::Arc;

/// A live view computed from an upstream [`Readable`].
///
/// Nothing is cached: `get` recomputes from the latest upstream snapshot and
/// subscribers see the mapped value on every upstream change.
pub struct Derived<S, T> {
    source: Arc<dyn Readable<S>>,
    map: Arc<dyn Fn(&S) -> T + Send + Sync>,
}

impl<S, T> Clone for Derived<S, T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            map: Arc::clone(&self.map),
        }
    }
}

impl<S, T> Derived<S, T>
where
    S: 'static,
    T: 'static,
{
    pub fn new<R, F>(source: R, map: F) -> Self
    where
        R: Readable<S> + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
            map: Arc::new(map),
        }
    }
}

impl<S, T> Readable<T> for Derived<S, T>
where
    S: 'static,
    T: 'static,
{
    fn get(&self) -> T {
        (self.map)(&self.source.get())
    }

    fn subscribe_listener(&self, listener: Listener<T>) -> Subscription {
        let map = Arc::clone(&self.map);
        self.source
            .subscribe_listener(Arc::new(move |upstream: &S| listener(&map(upstream))))
    }
}

/// Builds a [`Derived`] view over `source`.
pub fn derived<S, T, R, F>(source: R, map: F) -> Derived<S, T>
where
    S: 'static,
    T: 'static,
    R: Readable<S> + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    Derived::new(source, map)
}
