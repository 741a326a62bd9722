use axum::{extract::Extension, Json};
use discovery::Capabilities;
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    capabilities: Capabilities,
}

/// Health check endpoint
///
/// Always 200 while the process is up; the capability flags say which
/// optional stages are active.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        capabilities: state.pipeline.capabilities(),
    })
}
