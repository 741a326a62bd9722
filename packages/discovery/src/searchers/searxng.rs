//! SearXNG JSON API client.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{SearchError, SearchResult};
use crate::traits::searcher::MetaSearcher;
use crate::types::hit::SearchHit;

#[derive(Debug, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxResult>,
}

#[derive(Debug, Deserialize)]
struct SearxResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    engine: String,
}

/// Searcher backed by a self-hosted SearXNG instance.
///
/// Issues `GET {base}/search?q=...&format=json&language=en&pageno=1`.
#[derive(Clone)]
pub struct SearxngSearcher {
    client: reqwest::Client,
    base_url: String,
}

impl SearxngSearcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("opportunity-discovery/0.1")
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse a SearXNG JSON body into hits, skipping entries without a URL.
    pub fn parse_results(body: &str) -> SearchResult<Vec<SearchHit>> {
        let response: SearxResponse =
            serde_json::from_str(body).map_err(|e| SearchError::Malformed(e.to_string()))?;

        Ok(response
            .results
            .into_iter()
            .filter(|r| !r.url.trim().is_empty())
            .map(|r| {
                SearchHit::new(r.url.trim())
                    .with_title(r.title.trim())
                    .with_snippet(r.content.trim())
                    .with_source(r.engine)
            })
            .collect())
    }
}

fn classify(e: reqwest::Error) -> SearchError {
    if e.is_connect() || e.is_timeout() {
        SearchError::Unreachable(e.to_string())
    } else {
        SearchError::Request(e.to_string())
    }
}

#[async_trait]
impl MetaSearcher for SearxngSearcher {
    async fn search(&self, query: &str, timeout: Duration) -> SearchResult<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("language", "en"),
                ("pageno", "1"),
            ])
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(classify)?;
        let hits = Self::parse_results(&body)?;

        debug!(query = %query, hits = hits.len(), "SearXNG query complete");
        Ok(hits)
    }

    fn name(&self) -> &str {
        "searxng"
    }
}
