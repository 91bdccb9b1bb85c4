//! Document service: the only component that mutates stored documents.
//!
//! Every operation loads the document from the [`DocumentStore`], checks the
//! access rules from [`inkwell_core::access`], applies the change to the
//! in-memory aggregate (content changes go through
//! [`inkwell_core::revision`]), and persists it with a single store call.
//!
//! An access denial and a missing id produce the same
//! [`CoreError::NotFound`] so callers cannot probe for documents they are not
//! allowed to see.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use inkwell_core::access;
use inkwell_core::document::{
    normalize_title, validate_content, CreateDocument, Document, DocumentView, NewDocument,
    OwnerSummary, Revision, UpdateDocument,
};
use inkwell_core::error::CoreError;
use inkwell_core::revision::{self, RevisionSummary};
use inkwell_core::types::DbId;
use inkwell_db::{DocumentStore, StoreError};

use crate::error::AppResult;

/// Cheaply cloneable handle over a shared [`DocumentStore`].
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }

    /// Create a document owned by `owner`.
    ///
    /// Non-empty initial content is recorded as version 1.
    pub async fn create(&self, owner: DbId, input: CreateDocument) -> AppResult<Document> {
        let title = normalize_title(&input.title)?;
        validate_content(&input.content)?;

        let now = Utc::now();
        let versions = revision::initial_history(&input.content, owner, now);
        let doc = self
            .store
            .insert(NewDocument {
                title,
                content: input.content,
                owner_id: owner,
                is_public: input.is_public,
                created_at: now,
                versions,
            })
            .await?;

        tracing::info!(
            user_id = owner,
            document_id = doc.id,
            versions = doc.versions.len(),
            "Document created"
        );
        Ok(doc)
    }

    /// Every document the actor may read, with owners resolved for display.
    pub async fn list(&self, actor: DbId) -> AppResult<Vec<DocumentView>> {
        let docs = self.store.list_readable(actor).await?;

        let mut owner_ids: Vec<DbId> = docs.iter().map(|d| d.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let names = self.store.owner_names(&owner_ids).await?;

        Ok(docs.into_iter().map(|d| with_owner(d, &names)).collect())
    }

    pub async fn get(&self, id: DbId, actor: DbId) -> AppResult<DocumentView> {
        let doc = self.load_permitted(id, actor, access::can_read).await?;
        let names = self.store.owner_names(&[doc.owner_id]).await?;
        Ok(with_owner(doc, &names))
    }

    /// Apply the supplied fields. A content change appends a revision;
    /// `last_modified` is refreshed on every accepted update.
    pub async fn update(&self, id: DbId, actor: DbId, input: UpdateDocument) -> AppResult<Document> {
        let title = input.title.as_deref().map(normalize_title).transpose()?;
        if let Some(content) = &input.content {
            validate_content(content)?;
        }

        let mut doc = self.load_permitted(id, actor, access::can_write).await?;
        let now = Utc::now();

        if let Some(title) = title {
            doc.title = title;
        }
        if let Some(is_public) = input.is_public {
            doc.is_public = is_public;
        }
        let recorded = input
            .content
            .as_deref()
            .is_some_and(|content| revision::record_if_changed(&mut doc, content, actor, now));
        doc.last_modified = now;

        self.persist(&doc).await?;

        tracing::info!(
            user_id = actor,
            document_id = id,
            version_recorded = recorded,
            latest_version = revision::latest(&doc).map(|r| r.version),
            "Document updated"
        );
        Ok(doc)
    }

    /// Delete a document and its whole history. Owner only.
    pub async fn delete(&self, id: DbId, actor: DbId) -> AppResult<()> {
        self.load_permitted(id, actor, access::can_delete).await?;
        if !self.store.delete(id).await? {
            return Err(CoreError::document_not_found(id).into());
        }
        tracing::info!(user_id = actor, document_id = id, "Document deleted");
        Ok(())
    }

    /// Share a document. Owner only; adding an existing collaborator is a no-op.
    pub async fn add_collaborator(
        &self,
        id: DbId,
        actor: DbId,
        collaborator_id: DbId,
    ) -> AppResult<Document> {
        let mut doc = self.load_permitted(id, actor, access::can_share).await?;

        if collaborator_id == doc.owner_id {
            return Err(CoreError::Validation(
                "The owner cannot be added as a collaborator".into(),
            )
            .into());
        }

        if doc.add_collaborator(collaborator_id) {
            doc.last_modified = Utc::now();
            self.persist(&doc).await?;
            tracing::info!(
                user_id = actor,
                document_id = id,
                collaborator_id,
                "Collaborator added"
            );
        }
        Ok(doc)
    }

    /// Restore the content of `version` as a new revision. Owner only.
    ///
    /// A missing version, including any number outside the revision range,
    /// is reported as `DocumentVersion` not found, distinct from the document
    /// itself being absent.
    pub async fn restore_version(&self, id: DbId, actor: DbId, version: i64) -> AppResult<Document> {
        let mut doc = self.load_permitted(id, actor, access::can_write).await?;
        let now = Utc::now();

        let restored =
            i32::try_from(version).is_ok_and(|v| revision::restore(&mut doc, v, actor, now));
        if !restored {
            return Err(CoreError::version_not_found(version).into());
        }
        doc.last_modified = now;
        self.persist(&doc).await?;

        tracing::info!(
            user_id = actor,
            document_id = id,
            restored_version = version,
            latest_version = revision::latest(&doc).map(|r| r.version),
            "Document version restored"
        );
        Ok(doc)
    }

    /// Revision metadata, oldest first. Owner and collaborators only.
    pub async fn get_history(&self, id: DbId, actor: DbId) -> AppResult<Vec<RevisionSummary>> {
        let doc = self
            .load_permitted(id, actor, access::can_view_history)
            .await?;
        Ok(revision::history(&doc))
    }

    /// A single revision including its content. Owner and collaborators only.
    pub async fn get_version(&self, id: DbId, actor: DbId, version: i64) -> AppResult<Revision> {
        let doc = self
            .load_permitted(id, actor, access::can_view_history)
            .await?;
        i32::try_from(version)
            .ok()
            .and_then(|v| revision::find(&doc, v))
            .cloned()
            .ok_or_else(|| CoreError::version_not_found(version).into())
    }

    /// Load a document, hiding it behind not-found unless `allowed` passes.
    async fn load_permitted(
        &self,
        id: DbId,
        actor: DbId,
        allowed: fn(&Document, DbId) -> bool,
    ) -> AppResult<Document> {
        match self.store.load(id).await? {
            Some(doc) if allowed(&doc, actor) => Ok(doc),
            _ => Err(CoreError::document_not_found(id).into()),
        }
    }

    async fn persist(&self, doc: &Document) -> AppResult<()> {
        if self.store.save(doc).await? {
            Ok(())
        } else {
            Err(CoreError::document_not_found(doc.id).into())
        }
    }
}

fn with_owner(document: Document, names: &HashMap<DbId, String>) -> DocumentView {
    let owner = OwnerSummary {
        id: document.owner_id,
        username: names.get(&document.owner_id).cloned(),
    };
    DocumentView { document, owner }
}
