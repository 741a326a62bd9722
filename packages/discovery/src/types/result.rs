//! Pipeline request and result envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::listing::ExtractedListing;

/// One search request: free-text query, target category, optional location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, category: Category) -> Self {
        Self {
            query: query.into(),
            category,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// States the coordinator passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Planned,
    Searched,
    FilteredDeduped,
    Scraped,
    Extracted,
    Skipped,
    Formatted,
    Done,
}

/// Counters and trail recorded while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub queries_issued: usize,
    pub urls_found: usize,
    pub pages_scraped: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub fallback_used: bool,
    #[serde(default)]
    pub stages: Vec<PipelineStage>,
}

/// Best-effort result of one run. Only `data` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub success: bool,
    pub query: String,
    pub category: Category,
    pub total_results: usize,
    pub sources: Vec<String>,
    pub data: Vec<ExtractedListing>,
    pub metadata: PipelineMetadata,
}
