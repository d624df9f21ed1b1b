//! Remote CRUD collaborator contract.
//!
//! The network layer behind this trait is the source of truth a store keeps
//! its in-memory collection consistent with. The transport itself lives
//! outside the core.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract remote collection of raw wire DTOs.
///
/// Failure sentinels are expressed through `Result`: an `Err` from `create`
/// or `delete` means the mutation did not happen, `Ok(false)` from `delete`
/// means the remote refused it, and `Ok(None)` from `get` means not found.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Raw DTO as returned by the remote.
    type Raw: Send + 'static;
    /// Input accepted by `create`.
    type NewInput: Send + Sync;

    /// Creates a new record.
    ///
    /// # Returns
    ///
    /// - `Ok(Raw)`: The created record, carrying its remote-assigned key
    /// - `Err(_)`: The remote failed to create it
    async fn create(&self, input: &Self::NewInput) -> Result<Self::Raw>;

    /// Deletes the record with the given key.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: Deleted
    /// - `Ok(false)` / `Err(_)`: Not deleted
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Lists every record.
    async fn list(&self) -> Result<Vec<Self::Raw>>;

    /// Fetches a single record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Raw))`: Found
    /// - `Ok(None)`: Not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, id: &str) -> Result<Option<Self::Raw>>;
}
