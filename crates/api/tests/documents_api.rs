//! HTTP-level integration tests for the `/documents` API endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! over an in-memory document store.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, create_document, delete, get, post_json, put_json, send,
    send_raw,
};
use serde_json::json;

const OWNER: i64 = 1;
const STRANGER: i64 = 2;
const COLLABORATOR: i64 = 3;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_content_records_version_one() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/v1/documents",
        OWNER,
        json!({"title": "  Notes  ", "content": "hello"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let doc = &json["data"];
    assert_eq!(doc["title"], "Notes");
    assert_eq!(doc["owner_id"], OWNER);
    assert_eq!(doc["is_public"], false);
    assert_eq!(doc["versions"].as_array().unwrap().len(), 1);
    assert_eq!(doc["versions"][0]["version"], 1);
    assert_eq!(doc["versions"][0]["content"], "hello");
    assert_eq!(doc["versions"][0]["created_by"], OWNER);
}

#[tokio::test]
async fn create_with_empty_content_has_no_versions() {
    let app = build_test_app();
    let response = post_json(&app, "/api/v1/documents", OWNER, json!({"title": "Blank"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["versions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_without_token_returns_401() {
    let app = build_test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/v1/documents",
        None,
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_with_blank_title_returns_400() {
    let app = build_test_app();
    let response = post_json(&app, "/api/v1/documents", OWNER, json!({"title": "   "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = build_test_app();
    let response = send_raw(
        &app,
        Method::POST,
        "/api/v1/documents",
        Some(OWNER),
        Some("{\"title\": "),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let app = build_test_app();
    let response = get(&app, "/api/v1/documents/abc", Some(OWNER)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Versioning scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_edit_edit_restore_yields_three_versions() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Draft"})).await;
    let uri = format!("/api/v1/documents/{id}");

    for content in ["A", "A", "B"] {
        let response = put_json(&app, &uri, OWNER, json!({"content": content})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = post_json(&app, &format!("{uri}/versions/1/restore"), OWNER, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "A");

    let response = get(&app, &format!("{uri}/versions"), Some(OWNER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let versions = json["data"].as_array().unwrap();
    assert_eq!(versions.len(), 3);
    for (i, v) in versions.iter().enumerate() {
        assert_eq!(v["version"].as_i64().unwrap(), i as i64 + 1);
        assert!(v.get("content").is_none(), "history must omit content");
    }

    let response = get(&app, &format!("{uri}/versions/3"), Some(OWNER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "A");
    assert_eq!(json["data"]["version"], 3);
}

#[tokio::test]
async fn title_only_update_records_no_version() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Old", "content": "body"})).await;

    let response = put_json(
        &app,
        &format!("/api/v1/documents/{id}"),
        OWNER,
        json!({"title": "New"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "New");
    assert_eq!(json["data"]["versions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn restore_out_of_range_returns_404_without_change() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "T", "content": "one"})).await;
    let uri = format!("/api/v1/documents/{id}");

    for version in ["0", "2", "-1", "2147483648", "-2147483649"] {
        let response =
            post_json(&app, &format!("{uri}/versions/{version}/restore"), OWNER, json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "version {version}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "DocumentVersion not found");

        let response = get(&app, &format!("{uri}/versions/{version}"), Some(OWNER)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET version {version}");
    }

    let json = body_json(get(&app, &uri, Some(OWNER)).await).await;
    assert_eq!(json["data"]["content"], "one");
    assert_eq!(json["data"]["versions"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stranger_sees_not_found_identical_to_missing_document() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Private", "content": "x"})).await;
    let existing = format!("/api/v1/documents/{id}");
    let missing = "/api/v1/documents/999999";

    let missing_body = body_json(get(&app, missing, Some(STRANGER)).await).await;

    let attempts = [
        get(&app, &existing, Some(STRANGER)).await,
        put_json(&app, &existing, STRANGER, json!({"content": "hijack"})).await,
        delete(&app, &existing, STRANGER).await,
        post_json(&app, &format!("{existing}/versions/1/restore"), STRANGER, json!({})).await,
        post_json(
            &app,
            &format!("{existing}/collaborators"),
            STRANGER,
            json!({"user_id": STRANGER}),
        )
        .await,
        get(&app, &format!("{existing}/versions"), Some(STRANGER)).await,
    ];
    for response in attempts {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, missing_body);
    }

    let json = body_json(get(&app, &existing, Some(OWNER)).await).await;
    assert_eq!(json["data"]["content"], "x");
}

#[tokio::test]
async fn collaborator_can_read_and_view_history_but_not_write() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Shared", "content": "v1"})).await;
    let uri = format!("/api/v1/documents/{id}");

    let response = post_json(
        &app,
        &format!("{uri}/collaborators"),
        OWNER,
        json!({"user_id": COLLABORATOR}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["collaborators"], json!([COLLABORATOR]));

    assert_eq!(get(&app, &uri, Some(COLLABORATOR)).await.status(), StatusCode::OK);
    assert_eq!(
        get(&app, &format!("{uri}/versions"), Some(COLLABORATOR)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        put_json(&app, &uri, COLLABORATOR, json!({"content": "v2"})).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn adding_collaborator_twice_keeps_one_entry() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Shared"})).await;
    let uri = format!("/api/v1/documents/{id}/collaborators");

    post_json(&app, &uri, OWNER, json!({"user_id": COLLABORATOR})).await;
    let response = post_json(&app, &uri, OWNER, json!({"user_id": COLLABORATOR})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["collaborators"], json!([COLLABORATOR]));
}

#[tokio::test]
async fn owner_cannot_be_added_as_collaborator() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Mine"})).await;

    let response = post_json(
        &app,
        &format!("/api/v1/documents/{id}/collaborators"),
        OWNER,
        json!({"user_id": OWNER}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_document_is_readable_but_history_is_not() {
    let app = build_test_app();
    let id = create_document(
        &app,
        OWNER,
        json!({"title": "Open", "content": "hi", "is_public": true}),
    )
    .await;
    let uri = format!("/api/v1/documents/{id}");

    let response = get(&app, &uri, Some(STRANGER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner"]["id"], OWNER);

    assert_eq!(
        get(&app, &format!("{uri}/versions"), Some(STRANGER)).await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// List / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_owned_shared_and_public_documents() {
    let app = build_test_app();
    let own = create_document(&app, STRANGER, json!({"title": "own"})).await;
    let shared = create_document(&app, OWNER, json!({"title": "shared"})).await;
    let public = create_document(&app, OWNER, json!({"title": "public", "is_public": true})).await;
    let private = create_document(&app, OWNER, json!({"title": "private"})).await;

    post_json(
        &app,
        &format!("/api/v1/documents/{shared}/collaborators"),
        OWNER,
        json!({"user_id": STRANGER}),
    )
    .await;

    let json = body_json(get(&app, "/api/v1/documents", Some(STRANGER)).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();

    assert!(ids.contains(&own));
    assert!(ids.contains(&shared));
    assert!(ids.contains(&public));
    assert!(!ids.contains(&private));
}

#[tokio::test]
async fn delete_returns_204_then_document_is_gone() {
    let app = build_test_app();
    let id = create_document(&app, OWNER, json!({"title": "Doomed", "content": "x"})).await;
    let uri = format!("/api/v1/documents/{id}");

    let response = delete(&app, &uri, OWNER).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(&app, &uri, Some(OWNER)).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get(&app, &format!("{uri}/versions"), Some(OWNER)).await.status(),
        StatusCode::NOT_FOUND
    );
}
