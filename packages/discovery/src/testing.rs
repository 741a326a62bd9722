//! Testing utilities including mock implementations.
//!
//! These doubles stand in for the meta-search backend, the page fetcher and
//! the extraction service so the pipeline can be exercised without network
//! calls. Every mock records the calls made to it for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{FetchError, FetchResult, ModelError, ModelResult, SearchError, SearchResult};
use crate::traits::{fetcher::PageFetcher, model::ExtractionModel, searcher::MetaSearcher};
use crate::types::hit::SearchHit;

/// A mock meta-search backend.
///
/// Answers each query with its canned hits, falling back to the default hits
/// (empty unless set).
#[derive(Default)]
pub struct MockSearcher {
    /// Canned hits by exact query
    hits: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,

    /// Hits for any query without canned hits
    default_hits: Arc<RwLock<Vec<SearchHit>>>,

    /// Scripted failures by exact query
    failures: Arc<RwLock<HashMap<String, SearchError>>>,

    /// Every query fails as unreachable
    unreachable: bool,

    /// Sleep before answering, ignoring the requested timeout
    delay: Option<Duration>,

    /// Queries received, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.hits.write().unwrap().insert(query.into(), hits);
        self
    }

    pub fn with_default_hits(self, hits: Vec<SearchHit>) -> Self {
        *self.default_hits.write().unwrap() = hits;
        self
    }

    /// Make one query fail with `error`.
    pub fn fail_query(self, query: impl Into<String>, error: SearchError) -> Self {
        self.failures.write().unwrap().insert(query.into(), error);
        self
    }

    /// Behave like a backend that refuses connections.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Behave like a backend that hangs and never honours the timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl MetaSearcher for MockSearcher {
    async fn search(&self, query: &str, _timeout: Duration) -> SearchResult<Vec<SearchHit>> {
        self.calls.write().unwrap().push(query.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.unreachable {
            return Err(SearchError::Unreachable("connection refused".to_string()));
        }
        if let Some(error) = self.failures.read().unwrap().get(query) {
            return Err(error.clone());
        }

        let hits = self.hits.read().unwrap().get(query).cloned();
        Ok(hits.unwrap_or_else(|| self.default_hits.read().unwrap().clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock page fetcher.
///
/// Serves canned page text by URL, falling back to a default page. URLs
/// that were never configured and have no default fail with `Status 404`.
pub struct MockFetcher {
    /// Canned page text by URL
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// Text for any URL without a canned page
    default_page: Option<String>,

    /// URLs that fail with an HTTP error
    fail_urls: Arc<RwLock<HashSet<String>>>,

    /// Per-URL artificial latency
    delays: Arc<RwLock<HashMap<String, Duration>>>,

    /// Result of `probe()`
    available: bool,

    /// URLs requested, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            pages: Arc::default(),
            default_page: None,
            fail_urls: Arc::default(),
            delays: Arc::default(),
            available: true,
            calls: Arc::default(),
        }
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }

    pub fn with_default_page(mut self, text: impl Into<String>) -> Self {
        self.default_page = Some(text.into());
        self
    }

    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().insert(url.into());
        self
    }

    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// Report the backend as missing from `probe()`.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_urls.read().unwrap().contains(url) {
            return Err(FetchError::Http("connection reset by peer".into()));
        }

        let page = self.pages.read().unwrap().get(url).cloned();
        page.or_else(|| self.default_page.clone())
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    async fn probe(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock extraction service with one canned reply.
#[derive(Default)]
pub struct MockModel {
    /// Reply to every prompt; `Err` holds an API error message
    response: Option<Result<String, String>>,

    /// Prompts received
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockModel {
    /// A model that answers every prompt with an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(Ok(response.into()));
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.response = Some(Err(message.into()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionModel for MockModel {
    async fn complete(&self, prompt: &str) -> ModelResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        match &self.response {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(ModelError::Api(message.clone())),
            None => Ok("[]".to_string()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_searcher_records_queries() {
        let searcher = MockSearcher::new()
            .with_hits("rust jobs", vec![SearchHit::new("https://naukri.com/job/1")]);

        let hits = tokio_test::assert_ok!(searcher.search("rust jobs", Duration::from_secs(1)).await);
        let none = tokio_test::assert_ok!(searcher.search("go jobs", Duration::from_secs(1)).await);

        assert_eq!(hits.len(), 1);
        assert!(none.is_empty());
        assert_eq!(searcher.calls(), vec!["rust jobs", "go jobs"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_fail_url() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.example", "hello")
            .fail_url("https://b.example");

        assert_eq!(fetcher.fetch("https://a.example", Duration::from_secs(1)).await.unwrap(), "hello");
        tokio_test::assert_err!(fetcher.fetch("https://b.example", Duration::from_secs(1)).await);
        assert!(matches!(
            fetcher.fetch("https://c.example", Duration::from_secs(1)).await,
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_model_defaults_to_empty_array() {
        let model = MockModel::new();
        assert_eq!(model.complete("prompt").await.unwrap(), "[]");
        assert_eq!(model.prompts(), vec!["prompt"]);
    }
}
