//! Pipeline coordinator: sequences the stages and assembles the result.
//!
//! ```text
//! PLANNED → SEARCHED → FILTERED_DEDUPED → {SCRAPED → EXTRACTED | SKIPPED}
//!         → (FORMATTED if nothing was extracted) → DONE
//! ```
//!
//! Only an empty query is rejected. Everything else degrades to the next
//! viable stage and still produces a [`PipelineResult`].

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::dedup::{dedup_hits, dedup_listings};
use super::extract::StructuredExtractor;
use super::fallback::format_hits;
use super::planner::plan_queries;
use super::relevance::filter_relevant;
use super::scrape::BatchScraper;
use super::search::MetaSearchClient;
use crate::catalog::SiteCatalog;
use crate::error::{DiscoveryError, Result};
use crate::traits::{fetcher::PageFetcher, model::ExtractionModel, searcher::MetaSearcher};
use crate::types::config::PipelineConfig;
use crate::types::result::{PipelineMetadata, PipelineResult, PipelineStage, SearchRequest};

/// Which optional stages can run, decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub scraping: bool,
    pub extraction: bool,
}

impl Capabilities {
    /// Ask each optional backend whether it is usable. A missing backend is
    /// simply not capable.
    pub async fn probe(
        fetcher: Option<&Arc<dyn PageFetcher>>,
        model: Option<&Arc<dyn ExtractionModel>>,
    ) -> Self {
        let scraping = async {
            match fetcher {
                Some(f) => f.probe().await,
                None => false,
            }
        };
        let extraction = async {
            match model {
                Some(m) => m.probe().await,
                None => false,
            }
        };
        let (scraping, extraction) = futures::future::join(scraping, extraction).await;

        info!(scraping, extraction, "Capabilities probed");
        Self {
            scraping,
            extraction,
        }
    }
}

/// The discovery pipeline.
///
/// Holds only shareable client handles and read-only configuration; one
/// instance serves any number of concurrent runs.
#[derive(Clone)]
pub struct DiscoveryPipeline {
    config: PipelineConfig,
    catalog: &'static SiteCatalog,
    search: MetaSearchClient,
    scraper: Option<BatchScraper>,
    extractor: Option<StructuredExtractor>,
    capabilities: Capabilities,
}

impl DiscoveryPipeline {
    /// Pipeline with meta-search only. Results come from the fallback formatter.
    pub fn new(searcher: Arc<dyn MetaSearcher>, config: PipelineConfig) -> Self {
        Self {
            search: MetaSearchClient::new(searcher, config.search_timeout),
            catalog: SiteCatalog::global(),
            scraper: None,
            extractor: None,
            capabilities: Capabilities::default(),
            config,
        }
    }

    /// Attach a page fetcher and enable scraping.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.scraper = Some(
            BatchScraper::new(fetcher)
                .with_batch_size(self.config.batch_size)
                .with_page_timeout(self.config.page_timeout)
                .with_char_budget(self.config.page_char_budget),
        );
        self.capabilities.scraping = true;
        self
    }

    /// Attach an extraction model and enable extraction.
    pub fn with_model(mut self, model: Arc<dyn ExtractionModel>) -> Self {
        self.extractor = Some(
            StructuredExtractor::new(model)
                .with_max_pages(self.config.max_pages_for_extraction)
                .with_char_budget(self.config.extraction_char_budget),
        );
        self.capabilities.extraction = true;
        self
    }

    /// Override the capability flags, typically with [`Capabilities::probe`] results.
    ///
    /// A stage still needs its backend attached to run.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Flags as the coordinator will act on them.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            scraping: self.capabilities.scraping && self.scraper.is_some(),
            extraction: self.capabilities.extraction && self.extractor.is_some(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'static SiteCatalog {
        self.catalog
    }

    /// Run the pipeline once.
    ///
    /// Fails only with [`DiscoveryError::InvalidQuery`], before any network call.
    pub async fn run(&self, request: &SearchRequest) -> Result<PipelineResult> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(DiscoveryError::InvalidQuery {
                reason: "query must not be empty".to_string(),
            });
        }

        let category = request.category;
        let profile = self.catalog.profile(category);
        let location = profile.effective_location(request.location.as_deref());
        let capabilities = self.capabilities();
        let policy = self.config.url_normalization;
        let mut stages = Vec::with_capacity(7);

        info!(
            query = %query,
            category = %category,
            location = location.as_deref().unwrap_or("-"),
            scraping = capabilities.scraping,
            extraction = capabilities.extraction,
            "Starting discovery run"
        );

        // 1. Plan
        let plan = plan_queries(
            profile,
            query,
            location.as_deref(),
            self.config.sites_per_plan,
            self.config.max_queries,
        );
        stages.push(PipelineStage::Planned);

        // 2. Meta-search
        let outcome = self.search.search_all(&plan).await;
        stages.push(PipelineStage::Searched);

        // 3. Filter + dedup
        let hits = dedup_hits(filter_relevant(profile, outcome.hits), policy);
        stages.push(PipelineStage::FilteredDeduped);

        // 4. Scrape + extract, when both the capability and some input exist
        let mut pages_scraped = 0;
        let mut data = Vec::new();

        match self.scraper.as_ref() {
            Some(scraper) if capabilities.scraping && !hits.is_empty() => {
                let urls: Vec<String> = hits
                    .iter()
                    .take(self.config.max_scrape_urls)
                    .map(|h| h.url.clone())
                    .collect();
                let pages = scraper.scrape(&urls).await;
                pages_scraped = pages.len();
                stages.push(PipelineStage::Scraped);

                match self.extractor.as_ref() {
                    Some(extractor) if capabilities.extraction && !pages.is_empty() => {
                        data = dedup_listings(extractor.extract(profile, &pages).await, policy);
                        stages.push(PipelineStage::Extracted);
                    }
                    _ => stages.push(PipelineStage::Skipped),
                }
            }
            _ => stages.push(PipelineStage::Skipped),
        }

        // 5. Fallback
        let mut fallback_used = false;
        if data.is_empty() {
            data = format_hits(
                category,
                &hits,
                location.as_deref(),
                self.config.fallback_limit,
            );
            fallback_used = !data.is_empty();
            stages.push(PipelineStage::Formatted);
        }
        stages.push(PipelineStage::Done);

        if hits.is_empty() {
            warn!(query = %query, category = %category, "No relevant hits found");
        }
        info!(
            queries_issued = outcome.queries_issued,
            urls_found = hits.len(),
            pages_scraped,
            results = data.len(),
            fallback_used,
            "Discovery run complete"
        );

        Ok(PipelineResult {
            success: true,
            query: query.to_string(),
            category,
            total_results: data.len(),
            sources: self.catalog.sources(category),
            data,
            metadata: PipelineMetadata {
                queries_issued: outcome.queries_issued,
                urls_found: hits.len(),
                pages_scraped,
                timestamp: Utc::now(),
                fallback_used,
                stages,
            },
        })
    }

    /// Run the pipeline, giving up as soon as `token` is cancelled.
    ///
    /// A cancelled run returns [`DiscoveryError::Cancelled`] and nothing else;
    /// in-flight fetches are aborted.
    pub async fn run_until_cancelled(
        &self,
        request: &SearchRequest,
        token: &CancellationToken,
    ) -> Result<PipelineResult> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!(query = %request.query, "Discovery run cancelled");
                Err(DiscoveryError::Cancelled)
            }
            result = self.run(request) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFetcher, MockModel, MockSearcher};
    use crate::types::category::Category;
    use crate::types::hit::SearchHit;

    fn job_hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new("https://www.naukri.com/job/1").with_title("Rust Developer"),
            SearchHit::new("https://www.naukri.com/login"),
            SearchHit::new("https://www.linkedin.com/jobs/view/2").with_title("Backend Engineer"),
        ]
    }

    #[tokio::test]
    async fn test_probe_without_backends() {
        let caps = Capabilities::probe(None, None).await;
        assert_eq!(caps, Capabilities::default());
    }

    #[tokio::test]
    async fn test_probe_reports_unavailable_fetcher() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(MockFetcher::new().unavailable());
        let model: Arc<dyn ExtractionModel> = Arc::new(MockModel::new());
        let caps = Capabilities::probe(Some(&fetcher), Some(&model)).await;
        assert!(!caps.scraping);
        assert!(caps.extraction);
    }

    #[tokio::test]
    async fn test_search_only_pipeline_uses_fallback() {
        let searcher = Arc::new(MockSearcher::new().with_default_hits(job_hits()));
        let pipeline = DiscoveryPipeline::new(searcher, PipelineConfig::default());

        let result = pipeline
            .run(&SearchRequest::new("rust developer", Category::Job))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.total_results, 2);
        assert!(result.metadata.fallback_used);
        assert_eq!(
            result.metadata.stages,
            vec![
                PipelineStage::Planned,
                PipelineStage::Searched,
                PipelineStage::FilteredDeduped,
                PipelineStage::Skipped,
                PipelineStage::Formatted,
                PipelineStage::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_extracted_listings_skip_fallback() {
        let searcher = Arc::new(MockSearcher::new().with_default_hits(job_hits()));
        let fetcher = Arc::new(MockFetcher::new().with_default_page("Rust Developer at Acme"));
        let model = Arc::new(MockModel::new().with_response(
            r#"[{"role": "Rust Developer", "company": "Acme", "apply_link": "https://acme.example/jobs/1"},
                {"role": "Rust Developer", "company": "Acme", "apply_link": "https://acme.example/jobs/1?utm_source=x"}]"#,
        ));
        let pipeline = DiscoveryPipeline::new(searcher, PipelineConfig::default())
            .with_fetcher(fetcher)
            .with_model(model);

        let result = pipeline
            .run(&SearchRequest::new("rust developer", Category::Job))
            .await
            .unwrap();

        assert_eq!(result.total_results, 1);
        assert_eq!(result.metadata.pages_scraped, 2);
        assert!(!result.metadata.fallback_used);
        assert!(result.metadata.stages.contains(&PipelineStage::Extracted));
        assert!(!result.metadata.stages.contains(&PipelineStage::Formatted));
    }

    #[tokio::test]
    async fn test_capability_override_disables_scraping() {
        let searcher = Arc::new(MockSearcher::new().with_default_hits(job_hits()));
        let fetcher = Arc::new(MockFetcher::new().with_default_page("page"));
        let pipeline = DiscoveryPipeline::new(searcher, PipelineConfig::default())
            .with_fetcher(fetcher.clone())
            .with_capabilities(Capabilities::default());

        let result = pipeline
            .run(&SearchRequest::new("rust", Category::Job))
            .await
            .unwrap();

        assert!(fetcher.calls().is_empty());
        assert_eq!(result.metadata.pages_scraped, 0);
        assert_eq!(result.total_results, 2);
    }

    #[tokio::test]
    async fn test_course_ignores_location_override() {
        let searcher = Arc::new(MockSearcher::new());
        let pipeline = DiscoveryPipeline::new(searcher.clone(), PipelineConfig::default());

        pipeline
            .run(&SearchRequest::new("rust", Category::Course).with_location("Pune"))
            .await
            .unwrap();

        assert!(searcher.calls().iter().all(|q| !q.contains("Pune")));
    }

    #[tokio::test]
    async fn test_cancelled_run_returns_error() {
        let searcher = Arc::new(MockSearcher::new());
        let pipeline = DiscoveryPipeline::new(searcher.clone(), PipelineConfig::default());
        let token = CancellationToken::new();
        token.cancel();

        let err = pipeline
            .run_until_cancelled(&SearchRequest::new("rust", Category::Job), &token)
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::Cancelled));
        assert!(searcher.calls().is_empty());
    }
}
