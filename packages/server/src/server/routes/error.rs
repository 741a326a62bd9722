use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use discovery::DiscoveryError;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Errors a handler can answer with.
///
/// Rendered as `{"success": false, "error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("search did not finish within {}s", .0.as_secs())]
    DeadlineExceeded(Duration),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Discovery(DiscoveryError::InvalidQuery { .. })
            | Self::Discovery(DiscoveryError::UnknownCategory(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Discovery(DiscoveryError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
            Self::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Search request failed");
        }
        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
