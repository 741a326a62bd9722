//! URL relevance heuristics.
//!
//! A hit survives when its URL avoids the generic-page blocklist and either
//! carries a category path indicator or lives on a trusted host.

use tracing::debug;

use crate::catalog::CategoryProfile;
use crate::types::hit::SearchHit;

/// URL fragments of pages that never hold a listing, plus known-irrelevant
/// domains. Matched case-insensitively against the whole URL.
pub const BLOCKLIST: &[&str] = &[
    "login",
    "signup",
    "signin",
    "register",
    "auth",
    "account",
    "privacy",
    "terms",
    "cookie",
    "policy",
    "about-us",
    "/about",
    "contact",
    "faq",
    "help",
    "support",
    "wikipedia.org",
    "reddit.com",
    "play.google.com",
];

pub fn is_blocklisted(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    BLOCKLIST.iter().any(|kw| url.contains(kw))
}

/// Apply both relevance checks to one URL.
pub fn is_relevant_url(profile: &CategoryProfile, url: &str) -> bool {
    if is_blocklisted(url) {
        return false;
    }

    let lower = url.to_ascii_lowercase();
    if profile.path_indicators.iter().any(|p| lower.contains(p)) {
        return true;
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| profile.is_trusted_host(h)))
        .unwrap_or(false)
}

/// Keep the relevant hits, unchanged and in order.
pub fn filter_relevant(profile: &CategoryProfile, hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let before = hits.len();
    let kept: Vec<SearchHit> = hits
        .into_iter()
        .filter(|hit| is_relevant_url(profile, &hit.url))
        .collect();

    debug!(
        category = %profile.category,
        before,
        after = kept.len(),
        "Relevance filter applied"
    );
    kept
}
