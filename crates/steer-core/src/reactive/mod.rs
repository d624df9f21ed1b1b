//! Reactive primitives.
//!
//! - `Writable`: mutable container with listener fan-out
//! - `Derived`: computed view over another `Readable`
//! - `Subscription`: handle that detaches a listener
//!
//! # Usage
//!
//! ```
//! use steer_core::reactive::{Readable, Writable, derived};
//!
//! let items = Writable::new(vec![1, 2]);
//! let count = derived(items.clone(), |v: &Vec<i32>| v.len());
//! items.update(|v| v.push(3));
//! assert_eq!(count.get(), 3);
//! ```

mod derived;
mod subscription;
mod writable;

pub use derived::{Derived, derived};
pub use subscription::Subscription;
pub use writable::Writable;

use std::sync::Arc;

/// A registered change listener.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Read access to a reactive value.
pub trait Readable<T>: Send + Sync {
    /// Returns the current snapshot.
    fn get(&self) -> T;

    /// Registers `listener`; it is called immediately with the current value
    /// and again after every change, in registration order.
    fn subscribe_listener(&self, listener: Listener<T>) -> Subscription;

    /// Closure-taking form of [`Readable::subscribe_listener`].
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_listener(Arc::new(listener))
    }
}
