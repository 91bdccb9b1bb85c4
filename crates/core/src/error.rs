use crate::types::DbId;

/// Entity name used when a document is absent or hidden from the actor.
pub const ENTITY_DOCUMENT: &str = "Document";

/// Entity name used when a requested revision does not exist.
pub const ENTITY_DOCUMENT_VERSION: &str = "DocumentVersion";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// The not-found error returned for a missing document, and for any
    /// document the actor is not permitted to see or change.
    pub fn document_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: ENTITY_DOCUMENT,
            id,
        }
    }

    pub fn version_not_found(version: i64) -> Self {
        CoreError::NotFound {
            entity: ENTITY_DOCUMENT_VERSION,
            id: version,
        }
    }
}
