//! Integration tests for `MemoryDocumentStore`.
//!
//! Exercises the `DocumentStore` contract the API server relies on: id
//! assignment, whole-document replace, delete, and the readable-set query.

use chrono::Utc;
use inkwell_core::document::NewDocument;
use inkwell_core::revision;
use inkwell_db::{DocumentStore, MemoryDocumentStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_doc(owner_id: i64, title: &str, is_public: bool) -> NewDocument {
    NewDocument {
        title: title.to_string(),
        content: String::new(),
        owner_id,
        is_public,
        created_at: Utc::now(),
        versions: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Insert / load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_assigns_distinct_ids() {
    let store = MemoryDocumentStore::new();

    let a = store.insert(new_doc(1, "a", false)).await.unwrap();
    let b = store.insert(new_doc(1, "b", false)).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.document_count().await, 2);

    let loaded = store.load(a.id).await.unwrap().expect("document should exist");
    assert_eq!(loaded, a);
}

#[tokio::test]
async fn load_unknown_id_returns_none() {
    let store = MemoryDocumentStore::new();
    assert!(store.load(999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Save replaces content and history together
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_replaces_whole_document() {
    let store = MemoryDocumentStore::new();
    let mut doc = store.insert(new_doc(1, "a", false)).await.unwrap();

    revision::record_if_changed(&mut doc, "hello", 1, Utc::now());
    doc.title = "renamed".into();
    assert!(store.save(&doc).await.unwrap());

    let loaded = store.load(doc.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "renamed");
    assert_eq!(loaded.content, "hello");
    assert_eq!(loaded.versions.len(), 1);
    assert_eq!(loaded.versions[0].content, "hello");
}

#[tokio::test]
async fn save_after_delete_reports_missing() {
    let store = MemoryDocumentStore::new();
    let doc = store.insert(new_doc(1, "a", false)).await.unwrap();

    assert!(store.delete(doc.id).await.unwrap());
    assert!(!store.save(&doc).await.unwrap());
    assert!(store.load(doc.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_unknown_id_returns_false() {
    let store = MemoryDocumentStore::new();
    assert!(!store.delete(42).await.unwrap());
}

// ---------------------------------------------------------------------------
// Readable set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_readable_covers_owned_shared_and_public() {
    let store = MemoryDocumentStore::new();

    let owned = store.insert(new_doc(1, "owned", false)).await.unwrap();
    let mut shared = store.insert(new_doc(2, "shared", false)).await.unwrap();
    shared.add_collaborator(1);
    store.save(&shared).await.unwrap();
    let public = store.insert(new_doc(3, "public", true)).await.unwrap();
    let hidden = store.insert(new_doc(4, "hidden", false)).await.unwrap();

    let ids: Vec<i64> = store
        .list_readable(1)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();

    assert!(ids.contains(&owned.id));
    assert!(ids.contains(&shared.id));
    assert!(ids.contains(&public.id));
    assert!(!ids.contains(&hidden.id));
}

#[tokio::test]
async fn list_readable_orders_most_recent_first() {
    let store = MemoryDocumentStore::new();

    let mut older = store.insert(new_doc(1, "older", false)).await.unwrap();
    let newer = store.insert(new_doc(1, "newer", false)).await.unwrap();

    older.last_modified = newer.last_modified + chrono::Duration::seconds(5);
    store.save(&older).await.unwrap();

    let docs = store.list_readable(1).await.unwrap();
    assert_eq!(docs[0].id, older.id);
    assert_eq!(docs[1].id, newer.id);
}

// ---------------------------------------------------------------------------
// Owner names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_names_skips_unknown_ids() {
    let store = MemoryDocumentStore::new();
    store.register_user(1, "alice").await;

    let names = store.owner_names(&[1, 2]).await.unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names.get(&1).map(String::as_str), Some("alice"));
}
