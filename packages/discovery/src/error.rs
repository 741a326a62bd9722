//! Typed errors for the discovery library.
//!
//! Only [`DiscoveryError`] ever reaches a caller of the pipeline. The stage
//! errors ([`SearchError`], [`FetchError`], [`ModelError`]) are absorbed by the
//! coordinator and show up only as smaller counts in the result metadata.

use thiserror::Error;

/// Errors surfaced to callers of the pipeline.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Empty or whitespace-only query
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Category name outside JOB|INTERNSHIP|HACKATHON|COURSE
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The caller cancelled the run before it finished
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors from the meta-search backend.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Backend could not be reached at all (connection refused, DNS, timeout).
    ///
    /// Trips the circuit breaker: no further queries are issued for the run.
    #[error("search backend unreachable: {0}")]
    Unreachable(String),

    /// This one request failed for a reason other than reachability
    #[error("search request failed: {0}")]
    Request(String),

    /// Backend answered with a non-success status
    #[error("search backend returned HTTP {status}")]
    Status { status: u16 },

    /// Backend answered but the body was not the expected JSON
    #[error("malformed search response: {0}")]
    Malformed(String),
}

impl SearchError {
    /// Whether this failure means the whole backend is gone, not just one query.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Errors from the page-fetching backend.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Fetching backend missing or disabled
    #[error("page fetcher unavailable: {0}")]
    Unavailable(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Per-page timeout elapsed
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Page had no usable text
    #[error("no content at: {url}")]
    Empty { url: String },
}

/// Errors from the generative extraction service.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, empty choice list)
    #[error("API error: {0}")]
    Api(String),

    /// Response was not in the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for meta-search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction-service calls.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
