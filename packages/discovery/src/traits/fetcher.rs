//! Page-fetching backend trait.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::FetchResult;

/// Fetches the readable text of a single page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its text content.
    ///
    /// `timeout` bounds the whole fetch, body included.
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<String>;

    /// Capability probe, run once at startup.
    ///
    /// A fetcher that returns `false` is never handed to the pipeline.
    async fn probe(&self) -> bool {
        true
    }

    /// Fetcher name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
