//! Process-local [`DocumentStore`].
//!
//! Each operation takes the map lock once, so a save replaces the whole
//! aggregate atomically just like the PostgreSQL store does. Contents are
//! lost when the process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use inkwell_core::access;
use inkwell_core::document::{Document, NewDocument};
use inkwell_core::types::DbId;
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError};

pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<DbId, Document>>,
    users: RwLock<HashMap<DbId, String>>,
    next_id: AtomicI64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Record a display name for an account.
    pub async fn register_user(&self, id: DbId, username: impl Into<String>) {
        self.users.write().await.insert(id, username.into());
    }

    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let doc = doc.into_document(id);
        self.documents.write().await.insert(id, doc.clone());
        Ok(doc)
    }

    async fn load(&self, id: DbId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn save(&self, doc: &Document) -> Result<bool, StoreError> {
        let mut docs = self.documents.write().await;
        match docs.get_mut(&doc.id) {
            Some(slot) => {
                *slot = doc.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }

    async fn list_readable(&self, actor: DbId) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|d| access::can_read(d, actor))
            .cloned()
            .collect();
        docs.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(docs)
    }

    async fn owner_names(&self, ids: &[DbId]) -> Result<HashMap<DbId, String>, StoreError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|name| (*id, name.clone())))
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
