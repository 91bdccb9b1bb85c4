#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use inkwell_core::types::DbId;
use inkwell_db::MemoryDocumentStore;
use serde_json::Value;
use tower::ServiceExt;

use inkwell_api::auth::jwt::{generate_access_token, JwtConfig};
use inkwell_api::config::ServerConfig;
use inkwell_api::router::build_app_router;
use inkwell_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        ws_heartbeat_secs: 30,
        relay_require_read_access: false,
        database_url: None,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Application state over a fresh in-memory store.
pub fn build_test_state(config: ServerConfig) -> (AppState, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let state = AppState::new(config, store.clone());
    (state, store)
}

/// Build the full application router (same middleware stack as production)
/// over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    let (state, _) = build_test_state(config);
    build_app_router(state).expect("test CORS origins are valid")
}

/// Signed access token for the given account.
pub fn token_for(user_id: DbId) -> String {
    let username = format!("user{user_id}");
    generate_access_token(user_id, Some(&username), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Send a request, optionally authenticated as `user` and carrying a JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<DbId>,
    body: Option<Value>,
) -> Response {
    let body = body.map(|v| v.to_string());
    send_raw(app, method, uri, user, body.as_deref()).await
}

/// Like [`send`] but with an unparsed body string.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<DbId>,
    body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user {
        builder = builder.header("authorization", format!("Bearer {}", token_for(user_id)));
    }
    let request = match body {
        Some(text) => builder
            .header("content-type", "application/json")
            .body(Body::from(text.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, user: Option<DbId>) -> Response {
    send(app, Method::GET, uri, user, None).await
}

pub async fn post_json(app: &Router, uri: &str, user: DbId, body: Value) -> Response {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, user: DbId, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, user: DbId) -> Response {
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Create a document over HTTP and return its id.
pub async fn create_document(app: &Router, owner: DbId, body: Value) -> DbId {
    let response = post_json(app, "/api/v1/documents", owner, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
