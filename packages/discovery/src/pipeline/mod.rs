//! The discovery pipeline.
//!
//! Plan → meta-search → relevance filter → dedup → (scrape → extract) |
//! fallback → result. Every stage after planning degrades to an empty
//! contribution instead of failing.

pub mod coordinator;
pub mod dedup;
pub mod extract;
pub mod fallback;
pub mod planner;
pub mod prompts;
pub mod relevance;
pub mod scrape;
pub mod search;

pub use coordinator::{Capabilities, DiscoveryPipeline};
pub use dedup::{dedup_hits, dedup_listings};
pub use extract::{parse_listings, StructuredExtractor};
pub use fallback::format_hits;
pub use planner::plan_queries;
pub use prompts::{clean_json_response, format_extraction_prompt};
pub use relevance::{filter_relevant, is_blocklisted, is_relevant_url};
pub use scrape::BatchScraper;
pub use search::{MetaSearchClient, SearchOutcome};
