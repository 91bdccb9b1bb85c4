use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub name: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("create", "POST /api/v1/documents"),
    ("list", "GET /api/v1/documents"),
    ("get", "GET /api/v1/documents/{id}"),
    ("update", "PUT /api/v1/documents/{id}"),
    ("delete", "DELETE /api/v1/documents/{id}"),
    ("add_collaborator", "POST /api/v1/documents/{id}/collaborators"),
    ("history", "GET /api/v1/documents/{id}/versions"),
    ("get_version", "GET /api/v1/documents/{id}/versions/{version}"),
    ("restore_version", "POST /api/v1/documents/{id}/versions/{version}/restore"),
    ("relay", "GET /api/v1/ws"),
];

/// GET /api/v1/info
pub async fn api_info() -> Json<DataResponse<ApiInfo>> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|&(name, route)| EndpointInfo { name, route })
        .collect();

    Json(DataResponse {
        data: ApiInfo {
            name: "Inkwell document collaboration API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints,
        },
    })
}
