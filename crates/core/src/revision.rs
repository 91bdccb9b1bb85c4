//! Revision history rules for the document aggregate.
//!
//! History is append-only and dense: the n-th entry always carries version
//! `n`. A revision is recorded only when content actually changes, and a
//! restore is just another content change, so restoring never rewrites or
//! truncates earlier entries.
//!
//! These functions mutate the in-memory aggregate only. Callers persist the
//! whole document in one store write, which keeps content and history in step.

use serde::Serialize;

use crate::document::{Document, Revision};
use crate::types::{DbId, Timestamp};

/// History entry without its content snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionSummary {
    pub version: i32,
    pub created_at: Timestamp,
    pub created_by: DbId,
}

/// The most recent revision, if any.
pub fn latest(doc: &Document) -> Option<&Revision> {
    doc.versions.last()
}

/// The version number the next recorded revision will receive.
pub fn next_version(doc: &Document) -> i32 {
    next_in(&doc.versions)
}

fn next_in(versions: &[Revision]) -> i32 {
    versions.last().map_or(1, |r| r.version + 1)
}

fn push_revision(versions: &mut Vec<Revision>, content: &str, actor: DbId, at: Timestamp) {
    let version = next_in(versions);
    versions.push(Revision {
        content: content.to_string(),
        version,
        created_at: at,
        created_by: actor,
    });
}

/// History for a document created with `content`, measured against an empty
/// body: one revision when `content` is non-empty, none otherwise.
pub fn initial_history(content: &str, actor: DbId, at: Timestamp) -> Vec<Revision> {
    let mut versions = Vec::new();
    if !content.is_empty() {
        push_revision(&mut versions, content, actor, at);
    }
    versions
}

/// Replace the document content and append a revision if it differs from
/// the current body. Returns `true` when a revision was recorded.
pub fn record_if_changed(doc: &mut Document, new_content: &str, actor: DbId, at: Timestamp) -> bool {
    if doc.content == new_content {
        return false;
    }
    push_revision(&mut doc.versions, new_content, actor, at);
    doc.content = new_content.to_string();
    true
}

/// Metadata-only projection of the history, oldest first.
pub fn history(doc: &Document) -> Vec<RevisionSummary> {
    doc.versions
        .iter()
        .map(|r| RevisionSummary {
            version: r.version,
            created_at: r.created_at,
            created_by: r.created_by,
        })
        .collect()
}

/// Look up a revision by its version number.
pub fn find(doc: &Document, version: i32) -> Option<&Revision> {
    // Direct index when numbering is dense, scan otherwise.
    let direct = usize::try_from(version)
        .ok()
        .and_then(|v| v.checked_sub(1))
        .and_then(|idx| doc.versions.get(idx))
        .filter(|r| r.version == version);
    direct.or_else(|| doc.versions.iter().find(|r| r.version == version))
}

/// Restore the content of `version`.
///
/// Returns `false` without touching the document when the version does not
/// exist. Otherwise routes the snapshot through [`record_if_changed`].
pub fn restore(doc: &mut Document, version: i32, actor: DbId, at: Timestamp) -> bool {
    let Some(content) = find(doc, version).map(|r| r.content.clone()) else {
        return false;
    };
    record_if_changed(doc, &content, actor, at);
    true
}
