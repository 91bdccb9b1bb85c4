//! Row model for the `documents` table.

use inkwell_core::document::{Document, Revision};
use inkwell_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `documents` table. Revisions live in the `versions` JSONB column.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub owner_id: DbId,
    pub collaborators: Vec<DbId>,
    pub is_public: bool,
    pub versions: Json<Vec<Revision>>,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            title: row.title,
            content: row.content,
            owner_id: row.owner_id,
            collaborators: row.collaborators,
            is_public: row.is_public,
            last_modified: row.last_modified,
            created_at: row.created_at,
            versions: row.versions.0,
        }
    }
}

/// Owner id and display name from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserNameRow {
    pub id: DbId,
    pub username: String,
}
