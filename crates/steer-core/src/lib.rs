//! Domain layer for Steer.
//!
//! Holds the contracts the synchronization layer is built on (entities,
//! remote collections, notification sinks), the reactive primitives stores
//! publish through, the domain models, and the pure file tree filter.

pub mod config;
pub mod conversation;
pub mod entity;
pub mod error;
pub mod file_tree;
pub mod notification;
pub mod reactive;
pub mod remote;
pub mod repository_option;

// Re-export common error type
pub use error::{Result, SteerError};
