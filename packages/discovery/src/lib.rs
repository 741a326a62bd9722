//! Best-effort opportunity discovery.
//!
//! Federates a meta-search backend, a page fetcher and a generative
//! extraction service into one result set of jobs, internships, hackathons
//! or courses. Any subset of the three backends may be missing or failing;
//! the pipeline still returns a result, built from search hits alone if it
//! has to.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use discovery::{DiscoveryPipeline, PipelineConfig, SearchRequest, Category};
//! use discovery::searchers::SearxngSearcher;
//! use discovery::fetchers::HttpFetcher;
//!
//! let config = PipelineConfig::default();
//! let pipeline = DiscoveryPipeline::new(
//!     Arc::new(SearxngSearcher::new(&config.searxng_url)),
//!     config,
//! )
//! .with_fetcher(Arc::new(HttpFetcher::new()));
//!
//! let result = pipeline
//!     .run(&SearchRequest::new("python developer", Category::Job))
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Planner, meta-search, filter, dedup, scraper, extractor, fallback, coordinator
//! - [`catalog`] - Per-category sites, templates and relevance rules
//! - [`traits`] - Backend seams (MetaSearcher, PageFetcher, ExtractionModel)
//! - [`searchers`], [`fetchers`], [`ai`] - Backend implementations
//! - [`testing`] - Mock backends for tests

pub mod ai;
pub mod catalog;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod searchers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use catalog::{CategoryProfile, PlatformOverview, PlatformSummary, SiteCatalog};
pub use error::{DiscoveryError, FetchError, ModelError, Result, SearchError};
pub use pipeline::{Capabilities, DiscoveryPipeline};
pub use traits::{fetcher::PageFetcher, model::ExtractionModel, searcher::MetaSearcher};
pub use types::{
    category::Category,
    config::{PipelineConfig, UrlNormalization},
    hit::SearchHit,
    listing::{
        CourseListing, ExtractedListing, HackathonListing, InternshipListing, JobListing,
        SEE_LISTING,
    },
    page::ScrapedPage,
    result::{PipelineMetadata, PipelineResult, PipelineStage, SearchRequest},
};

// Token accepted by `DiscoveryPipeline::run_until_cancelled`
pub use tokio_util::sync::CancellationToken;
