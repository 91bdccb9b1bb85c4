use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use inkwell_core::collaboration::RelayMessage;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::manager::WsSender;

/// Query parameters accepted on the upgrade request.
///
/// Browsers cannot set headers on a WebSocket handshake, so the access token
/// travels in the query string.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// A token is optional unless `RELAY_REQUIRE_READ_ACCESS` is set, in which
/// case the upgrade is refused with 401 when it is missing. An invalid token
/// is always refused. The token is checked before the upgrade headers.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let user_id = match authenticate(&state, params.token.as_deref()) {
        Ok(user_id) => user_id,
        Err(e) => return e.into_response(),
    };

    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)),
        Err(rejection) => rejection.into_response(),
    }
}

fn authenticate(state: &AppState, token: Option<&str>) -> AppResult<Option<DbId>> {
    match token {
        Some(token) => Ok(Some(AuthUser::from_token(token, &state.config.jwt)?.user_id)),
        None if state.config.relay_require_read_access => Err(AppError::Core(
            CoreError::Unauthorized("Missing token query parameter".into()),
        )),
        None => Ok(None),
    }
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the connection channel.
///   3. Dispatches inbound relay messages on the current task.
///   4. Leaves every document group and deregisters on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: Option<DbId>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = ?user_id, "WebSocket connected");

    let (tx, mut rx) = state.ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_text(&state, &conn_id, user_id, &tx, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    let groups_left = state.relay.on_disconnect(&conn_id).await;
    let session_secs = state
        .ws_manager
        .remove(&conn_id)
        .await
        .map(|conn| (chrono::Utc::now() - conn.connected_at).num_seconds());
    send_task.abort();
    tracing::info!(
        conn_id = %conn_id,
        user_id = ?user_id,
        groups_left,
        session_secs = ?session_secs,
        "WebSocket disconnected"
    );
}

/// Dispatch one text frame, answering a rejected frame with `relay.error`.
/// The connection stays open either way.
async fn handle_text(
    state: &AppState,
    conn_id: &str,
    user_id: Option<DbId>,
    tx: &WsSender,
    text: &str,
) {
    if let Err(reason) = dispatch(state, conn_id, user_id, tx, text).await {
        tracing::debug!(conn_id, reason = %reason, "Relay message rejected");
        reply_error(state, conn_id, reason).await;
    }
}

/// Apply one inbound frame. An `Err` carries the reason sent back to the client.
async fn dispatch(
    state: &AppState,
    conn_id: &str,
    user_id: Option<DbId>,
    tx: &WsSender,
    text: &str,
) -> Result<(), String> {
    let message: RelayMessage =
        serde_json::from_str(text).map_err(|e| format!("Malformed message: {e}"))?;

    match message {
        RelayMessage::Join { document_id } => {
            if state.config.relay_require_read_access {
                authorize_join(state, user_id, &document_id).await?;
            }
            let joined = state.relay.join(conn_id, tx, &document_id).await;
            tracing::debug!(conn_id, document_id = %document_id, joined, "Joined document group");
        }
        RelayMessage::Leave { document_id } => {
            let left = state.relay.leave(conn_id, &document_id).await;
            tracing::debug!(conn_id, document_id = %document_id, left, "Left document group");
        }
        RelayMessage::Change {
            document_id,
            changes,
        } => {
            let recipients = state
                .relay
                .broadcast_change(conn_id, &document_id, changes)
                .await
                .ok_or("Join the document before sending changes")?;
            tracing::trace!(conn_id, document_id = %document_id, recipients, "Change relayed");
        }
        RelayMessage::Update { .. } | RelayMessage::Error { .. } => {
            return Err("Unsupported message type".into());
        }
    }
    Ok(())
}

/// Joining requires that the actor could read the document over HTTP.
async fn authorize_join(
    state: &AppState,
    user_id: Option<DbId>,
    document_id: &str,
) -> Result<(), String> {
    let actor = user_id.ok_or("Authentication required")?;
    let id: DbId = document_id.parse().map_err(|_| "Document not found")?;

    match state.documents.get(id, actor).await {
        Ok(_) => Ok(()),
        Err(AppError::Store(e)) => {
            tracing::warn!(error = %e, document_id = id, "Store error while authorizing join");
            Err("Unable to verify document access".into())
        }
        Err(_) => Err("Document not found".into()),
    }
}

async fn reply_error(state: &AppState, conn_id: &str, reason: String) {
    match serde_json::to_string(&RelayMessage::error(reason)) {
        Ok(text) => {
            state
                .ws_manager
                .send_to(conn_id, Message::Text(text.into()))
                .await;
        }
        Err(e) => tracing::warn!(conn_id, error = %e, "Failed to encode relay error"),
    }
}
