pub mod documents;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                              WebSocket relay
/// /info                                            endpoint listing
///
/// /documents                                       list, create
/// /documents/{id}                                  get, update, delete
/// /documents/{id}/collaborators                    add collaborator (POST)
/// /documents/{id}/versions                         version history (GET)
/// /documents/{id}/versions/{version}               one version (GET)
/// /documents/{id}/versions/{version}/restore       restore (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/info", get(handlers::info::api_info))
        .nest("/documents", documents::router())
}
