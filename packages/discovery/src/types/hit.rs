//! Search hits returned by the meta-search backend.

use serde::{Deserialize, Serialize};

/// One result entry from the meta-search backend.
///
/// Identity is the normalized URL (see [`UrlNormalization`]).
///
/// [`UrlNormalization`]: crate::types::config::UrlNormalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    /// Engine that produced the hit (e.g. "google", "bing", "duckduckgo").
    #[serde(default)]
    pub source: String,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            snippet: String::new(),
            source: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Host of the hit without a leading `www.`, or `"unknown"`.
    pub fn domain(&self) -> String {
        domain_of(&self.url)
    }
}

/// Host of a URL without a leading `www.`, or `"unknown"` when unparsable.
pub fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_strips_www() {
        let hit = SearchHit::new("https://www.naukri.com/python-jobs");
        assert_eq!(hit.domain(), "naukri.com");
    }

    #[test]
    fn test_domain_of_garbage_is_unknown() {
        assert_eq!(domain_of("not a url"), "unknown");
        assert_eq!(domain_of(""), "unknown");
    }
}
