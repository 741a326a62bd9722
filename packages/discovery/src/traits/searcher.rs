//! Meta-search backend trait.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::SearchResult;
use crate::types::hit::SearchHit;

/// An aggregating search backend (SearXNG and friends).
///
/// Implementations must report a backend that cannot be reached at all as
/// [`SearchError::Unreachable`]; the pipeline stops issuing queries for the
/// run when it sees one. Every other error only costs the current query.
///
/// [`SearchError::Unreachable`]: crate::error::SearchError::Unreachable
#[async_trait]
pub trait MetaSearcher: Send + Sync {
    /// Run one query, returning hits in backend order.
    async fn search(&self, query: &str, timeout: Duration) -> SearchResult<Vec<SearchHit>>;

    /// Backend name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
