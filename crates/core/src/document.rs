//! The document aggregate, its embedded revision list, and input validation.
//!
//! A [`Document`] is persisted as a single record: scalar fields, the
//! collaborator set, and the ordered [`Revision`] list travel together so a
//! save can never write content without its matching history entry.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum title length in characters (after trimming).
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum content size in bytes (1 MiB).
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// A shared text document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub owner_id: DbId,
    /// Accounts granted read and history access. Never contains duplicates.
    pub collaborators: Vec<DbId>,
    pub is_public: bool,
    pub last_modified: Timestamp,
    pub created_at: Timestamp,
    /// Chronological history; `versions[i].version == i + 1`.
    pub versions: Vec<Revision>,
}

/// An immutable content snapshot in a document's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub content: String,
    pub version: i32,
    pub created_at: Timestamp,
    pub created_by: DbId,
}

/// A document that has not been assigned an id yet.
///
/// Built by the document service and handed to the store, which assigns the
/// id on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub owner_id: DbId,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub versions: Vec<Revision>,
}

impl NewDocument {
    /// Attach a store-assigned id, producing the persisted aggregate.
    pub fn into_document(self, id: DbId) -> Document {
        Document {
            id,
            title: self.title,
            content: self.content,
            owner_id: self.owner_id,
            collaborators: Vec::new(),
            is_public: self.is_public,
            last_modified: self.created_at,
            created_at: self.created_at,
            versions: self.versions,
        }
    }
}

/// DTO for creating a document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
}

/// DTO for updating a document. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
}

/// DTO for sharing a document with another account.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCollaborator {
    pub user_id: DbId,
}

/// Account reference resolved for display alongside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: DbId,
    pub username: Option<String>,
}

/// A document as returned by read endpoints, with its owner resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub owner: OwnerSummary,
}

impl Document {
    pub fn is_owner(&self, actor: DbId) -> bool {
        self.owner_id == actor
    }

    pub fn is_collaborator(&self, actor: DbId) -> bool {
        self.collaborators.contains(&actor)
    }

    /// Add a collaborator unless already present. Returns `true` if added.
    pub fn add_collaborator(&mut self, user_id: DbId) -> bool {
        if self.is_collaborator(user_id) {
            return false;
        }
        self.collaborators.push(user_id);
        true
    }
}

/// Validate and normalize a document title.
///
/// Surrounding whitespace is trimmed; the result must be non-empty and at
/// most [`MAX_TITLE_LEN`] characters.
pub fn normalize_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate document content size.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_BYTES} bytes"
        )));
    }
    Ok(())
}
