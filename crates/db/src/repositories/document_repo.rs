//! Repository for the `documents` table.
//!
//! Content and the embedded revision list are always written by the same
//! statement.

use inkwell_core::document::{Document, NewDocument};
use inkwell_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::document::DocumentRow;

/// Column list for documents queries.
const COLUMNS: &str = "id, title, content, owner_id, collaborators, is_public, versions, \
                       created_at, last_modified";

/// Provides CRUD operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (title, content, owner_id, is_public, versions, created_at, last_modified)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.owner_id)
            .bind(input.is_public)
            .bind(Json(&input.versions))
            .bind(input.created_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a document by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Overwrite every mutable column of a document. Returns `false` if no row matched.
    pub async fn replace(pool: &PgPool, doc: &Document) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET
                title = $2,
                content = $3,
                collaborators = $4,
                is_public = $5,
                versions = $6,
                last_modified = $7
             WHERE id = $1",
        )
        .bind(doc.id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(&doc.collaborators)
        .bind(doc.is_public)
        .bind(Json(&doc.versions))
        .bind(doc.last_modified)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a document. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List documents the user owns, collaborates on, or that are public.
    pub async fn list_readable(pool: &PgPool, user_id: DbId) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE owner_id = $1 OR $1 = ANY(collaborators) OR is_public
             ORDER BY last_modified DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
