//! Handlers for documents, sharing, and revision history.
//!
//! All endpoints require authentication via [`AuthUser`]. Access rules live
//! in [`DocumentService`](crate::service::DocumentService); a document the
//! caller may not touch responds exactly like one that does not exist.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use inkwell_core::document::{AddCollaborator, CreateDocument, UpdateDocument};
use inkwell_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Document CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/documents
pub async fn create_document(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDocument>,
) -> AppResult<impl IntoResponse> {
    let doc = state.documents.create(auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: doc })))
}

/// GET /api/v1/documents
///
/// Every document the caller owns, collaborates on, or that is public.
pub async fn list_documents(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let docs = state.documents.list(auth.user_id).await?;
    Ok(Json(DataResponse { data: docs }))
}

/// GET /api/v1/documents/{id}
pub async fn get_document(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = state.documents.get(id, auth.user_id).await?;
    Ok(Json(DataResponse { data: doc }))
}

/// PUT /api/v1/documents/{id}
///
/// Owner only. A content change records a new version.
pub async fn update_document(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateDocument>,
) -> AppResult<impl IntoResponse> {
    let doc = state.documents.update(id, auth.user_id, input).await?;
    Ok(Json(DataResponse { data: doc }))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete_document(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    state.documents.delete(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

/// POST /api/v1/documents/{id}/collaborators
pub async fn add_collaborator(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AddCollaborator>,
) -> AppResult<impl IntoResponse> {
    let doc = state
        .documents
        .add_collaborator(id, auth.user_id, input.user_id)
        .await?;
    Ok(Json(DataResponse { data: doc }))
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// GET /api/v1/documents/{id}/versions
///
/// Version metadata, oldest first. Content is omitted.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let history = state.documents.get_history(id, auth.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/documents/{id}/versions/{version}
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((id, version)): AppPath<(DbId, i64)>,
) -> AppResult<impl IntoResponse> {
    let revision = state.documents.get_version(id, auth.user_id, version).await?;
    Ok(Json(DataResponse { data: revision }))
}

/// POST /api/v1/documents/{id}/versions/{version}/restore
///
/// Appends the restored content as the newest version; history is never
/// rewritten.
pub async fn restore_version(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((id, version)): AppPath<(DbId, i64)>,
) -> AppResult<impl IntoResponse> {
    let doc = state
        .documents
        .restore_version(id, auth.user_id, version)
        .await?;
    Ok(Json(DataResponse { data: doc }))
}
