//! PostgreSQL-backed [`DocumentStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use inkwell_core::document::{Document, NewDocument};
use inkwell_core::types::DbId;

use crate::repositories::{DocumentRepo, UserRepo};
use crate::store::{DocumentStore, StoreError};
use crate::DbPool;

/// Document store over a sqlx connection pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError> {
        Ok(DocumentRepo::create(&self.pool, &doc).await?)
    }

    async fn load(&self, id: DbId) -> Result<Option<Document>, StoreError> {
        Ok(DocumentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn save(&self, doc: &Document) -> Result<bool, StoreError> {
        let saved = DocumentRepo::replace(&self.pool, doc).await?;
        if !saved {
            tracing::warn!(document_id = doc.id, "Document row vanished before save");
        }
        Ok(saved)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(DocumentRepo::delete(&self.pool, id).await?)
    }

    async fn list_readable(&self, actor: DbId) -> Result<Vec<Document>, StoreError> {
        Ok(DocumentRepo::list_readable(&self.pool, actor).await?)
    }

    async fn owner_names(&self, ids: &[DbId]) -> Result<HashMap<DbId, String>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = UserRepo::find_names(&self.pool, ids).await?;
        Ok(rows.into_iter().map(|r| (r.id, r.username)).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
