use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use discovery::{Category, PipelineResult, SearchRequest};
use serde::Deserialize;

use super::error::ApiError;
use crate::server::app::AppState;

/// Search request body. Category defaults to `JOB`.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl SearchBody {
    pub fn into_request(self) -> Result<SearchRequest, ApiError> {
        let category = match self.category.as_deref() {
            Some(name) => name.parse::<Category>()?,
            None => Category::default(),
        };

        let mut request = SearchRequest::new(self.query, category);
        request.location = self.location;
        Ok(request)
    }
}

/// Search endpoint, served at both `/jobs/search` and `/jobs/search-india`.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<PipelineResult>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = body.into_request()?;

    let run = state.pipeline.run_until_cancelled(&request, &state.shutdown);
    let result = match state.search_deadline {
        Some(deadline) => tokio::time::timeout(deadline, run)
            .await
            .map_err(|_| ApiError::DeadlineExceeded(deadline))??,
        None => run.await?,
    };

    Ok(Json(result))
}
