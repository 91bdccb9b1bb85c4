//! Document access decisions.
//!
//! Pure functions over a document and an actor id. Callers translate a
//! `false` into a not-found response so that a document the actor cannot see
//! is indistinguishable from one that does not exist.

use crate::document::Document;
use crate::types::DbId;

/// Owner, any collaborator, or anyone when the document is public.
pub fn can_read(doc: &Document, actor: DbId) -> bool {
    doc.is_owner(actor) || doc.is_collaborator(actor) || doc.is_public
}

/// Only the owner may change title, content, or visibility.
pub fn can_write(doc: &Document, actor: DbId) -> bool {
    doc.is_owner(actor)
}

/// Owner and collaborators; public visitors are excluded.
pub fn can_view_history(doc: &Document, actor: DbId) -> bool {
    doc.is_owner(actor) || doc.is_collaborator(actor)
}

pub fn can_share(doc: &Document, actor: DbId) -> bool {
    doc.is_owner(actor)
}

pub fn can_delete(doc: &Document, actor: DbId) -> bool {
    doc.is_owner(actor)
}
