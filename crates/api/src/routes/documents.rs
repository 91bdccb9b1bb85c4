use axum::routing::{get, post};
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Document routes mounted at `/documents`.
///
/// ```text
/// GET    /                                 -> list_documents
/// POST   /                                 -> create_document
/// GET    /{id}                             -> get_document
/// PUT    /{id}                             -> update_document
/// DELETE /{id}                             -> delete_document
/// POST   /{id}/collaborators               -> add_collaborator
/// GET    /{id}/versions                    -> list_versions
/// GET    /{id}/versions/{version}          -> get_version
/// POST   /{id}/versions/{version}/restore  -> restore_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/{id}/collaborators", post(documents::add_collaborator))
        .route("/{id}/versions", get(documents::list_versions))
        .route("/{id}/versions/{version}", get(documents::get_version))
        .route(
            "/{id}/versions/{version}/restore",
            post(documents::restore_version),
        )
}
