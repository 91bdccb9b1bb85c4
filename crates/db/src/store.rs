//! The document store contract.

use std::collections::HashMap;

use async_trait::async_trait;
use inkwell_core::document::{Document, NewDocument};
use inkwell_core::types::DbId;

pub use sqlx::Error as SqlxError;

/// Failure of the underlying store. Never retried by callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Atomic single-document persistence.
///
/// Every method touches exactly one document record (or reads a set of
/// them), and the embedded revision list is always read and written together
/// with the scalar fields.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return it with its assigned id.
    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError>;

    async fn load(&self, id: DbId) -> Result<Option<Document>, StoreError>;

    /// Replace the stored document whole. Returns `false` if it no longer exists.
    async fn save(&self, doc: &Document) -> Result<bool, StoreError>;

    /// Delete a document and its history. Returns `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Documents owned by, shared with, or publicly visible to `actor`,
    /// most recently modified first.
    async fn list_readable(&self, actor: DbId) -> Result<Vec<Document>, StoreError>;

    /// Display names for the given account ids. Unknown ids are omitted.
    async fn owner_names(&self, ids: &[DbId]) -> Result<HashMap<DbId, String>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
