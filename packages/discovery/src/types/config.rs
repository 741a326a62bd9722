//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Query parameters that never change which page a URL points at.
const TRACKING_PARAMS: &[&str] = &[
    "ref",
    "refid",
    "fbclid",
    "gclid",
    "trk",
    "trackingid",
];

/// How two hit URLs are judged to be the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlNormalization {
    /// Byte-for-byte comparison.
    Exact,

    /// Lower-case host, no fragment, no tracking parameters (`utm_*`, `ref`,
    /// `fbclid`, ...), no trailing slash on non-root paths.
    #[default]
    StripTracking,

    /// Like `StripTracking` but drops the whole query string.
    StripQuery,
}

impl UrlNormalization {
    /// Identity key for `raw` under this policy.
    ///
    /// Unparsable URLs fall back to their trimmed text.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if *self == Self::Exact {
            return trimmed.to_string();
        }

        let Ok(mut url) = Url::parse(trimmed) else {
            return trimmed.to_string();
        };

        url.set_fragment(None);

        match self {
            Self::StripQuery => url.set_query(None),
            _ => {
                let kept: Vec<(String, String)> = url
                    .query_pairs()
                    .filter(|(k, _)| {
                        let k = k.to_ascii_lowercase();
                        !k.starts_with("utm_") && !TRACKING_PARAMS.iter().any(|p| *p == k)
                    })
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                if kept.is_empty() {
                    url.set_query(None);
                } else {
                    url.query_pairs_mut().clear().extend_pairs(kept);
                }
            }
        }

        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(if path.is_empty() { "/" } else { &path });

        url.to_string()
    }
}

/// Tunables for one pipeline instance.
///
/// Every budget the pipeline enforces lives here rather than in constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base address of the SearXNG meta-search backend.
    pub searxng_url: String,

    /// Per-query timeout against the meta-search backend.
    #[serde(with = "duration_secs")]
    pub search_timeout: Duration,

    /// Upper bound on planned queries per run.
    pub max_queries: usize,

    /// How many of the category's sites get site-targeted queries.
    pub sites_per_plan: usize,

    /// How many deduplicated URLs are handed to the scraper.
    pub max_scrape_urls: usize,

    /// Concurrent page fetches per batch.
    pub batch_size: usize,

    /// Per-page fetch timeout.
    #[serde(with = "duration_secs")]
    pub page_timeout: Duration,

    /// Characters kept per scraped page.
    pub page_char_budget: usize,

    /// Pages concatenated into the extraction prompt.
    pub max_pages_for_extraction: usize,

    /// Characters of page content allowed in the extraction prompt.
    pub extraction_char_budget: usize,

    /// Hits the fallback formatter turns into listings.
    pub fallback_limit: usize,

    pub url_normalization: UrlNormalization,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            searxng_url: "http://localhost:8080".to_string(),
            search_timeout: Duration::from_secs(10),
            max_queries: 15,
            sites_per_plan: 5,
            max_scrape_urls: 12,
            batch_size: 5,
            page_timeout: Duration::from_secs(30),
            page_char_budget: 6_000,
            max_pages_for_extraction: 5,
            extraction_char_budget: 50_000,
            fallback_limit: 20,
            url_normalization: UrlNormalization::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searxng_url(mut self, url: impl Into<String>) -> Self {
        self.searxng_url = url.into();
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_max_queries(mut self, max: usize) -> Self {
        self.max_queries = max;
        self
    }

    pub fn with_max_scrape_urls(mut self, max: usize) -> Self {
        self.max_scrape_urls = max;
        self
    }

    /// Set the batch size. Zero is clamped to one.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_url_normalization(mut self, policy: UrlNormalization) -> Self {
        self.url_normalization = policy;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
