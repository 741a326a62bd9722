//! Deduplication by normalized URL. First occurrence wins.

use std::collections::HashSet;

use crate::types::config::UrlNormalization;
use crate::types::hit::SearchHit;
use crate::types::listing::ExtractedListing;

/// Drop hits whose normalized URL was already seen, keeping relative order.
pub fn dedup_hits(hits: Vec<SearchHit>, policy: UrlNormalization) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(policy.normalize(&hit.url)))
        .collect()
}

/// Drop listings with no link or with a link already seen.
pub fn dedup_listings(
    listings: Vec<ExtractedListing>,
    policy: UrlNormalization,
) -> Vec<ExtractedListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| !l.link().trim().is_empty() && seen.insert(policy.normalize(l.link())))
        .collect()
}
