//! Meta-search over the planned queries with a lightweight circuit breaker.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::traits::searcher::MetaSearcher;
use crate::types::hit::SearchHit;

/// What one pass over the query plan produced.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Hits from every answered query, in plan order.
    pub hits: Vec<SearchHit>,

    /// Queries actually sent to the backend.
    pub queries_issued: usize,

    /// Queries that were sent but produced no hits because they failed.
    pub failed_queries: usize,

    /// The backend was found unreachable and the rest of the plan was dropped.
    pub circuit_open: bool,
}

/// Issues planned queries against a [`MetaSearcher`] one at a time.
///
/// A failing query contributes nothing and the plan continues. An
/// unreachable backend stops the plan, so a dead backend costs at most one
/// timeout per run. A query that outlives the timeout counts as unreachable
/// even if the backend ignores the timeout it was given.
#[derive(Clone)]
pub struct MetaSearchClient {
    searcher: Arc<dyn MetaSearcher>,
    timeout: Duration,
}

impl MetaSearchClient {
    pub fn new(searcher: Arc<dyn MetaSearcher>, timeout: Duration) -> Self {
        Self { searcher, timeout }
    }

    pub async fn search_all(&self, queries: &[String]) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();

        for query in queries {
            outcome.queries_issued += 1;

            let result = tokio::time::timeout(self.timeout, self.searcher.search(query, self.timeout))
                .await
                .unwrap_or_else(|_| {
                    Err(SearchError::Unreachable(format!(
                        "no answer within {}ms",
                        self.timeout.as_millis()
                    )))
                });

            match result {
                Ok(hits) => {
                    debug!(query = %query, hits = hits.len(), "Query answered");
                    outcome.hits.extend(hits);
                }
                Err(e) if e.is_unreachable() => {
                    warn!(
                        searcher = self.searcher.name(),
                        query = %query,
                        error = %e,
                        "Search backend unreachable, skipping remaining queries"
                    );
                    outcome.failed_queries += 1;
                    outcome.circuit_open = true;
                    break;
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Query failed");
                    outcome.failed_queries += 1;
                }
            }
        }

        info!(
            issued = outcome.queries_issued,
            planned = queries.len(),
            hits = outcome.hits.len(),
            failed = outcome.failed_queries,
            circuit_open = outcome.circuit_open,
            "Meta-search complete"
        );

        outcome
    }
}
