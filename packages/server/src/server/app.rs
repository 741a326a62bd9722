//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use discovery::fetchers::HttpFetcher;
use discovery::searchers::SearxngSearcher;
use discovery::{
    ai::OpenAiModel, Capabilities, DiscoveryPipeline, ExtractionModel, MetaSearcher, PageFetcher,
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{categories_handler, health_handler, platforms_handler, search_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DiscoveryPipeline>,
    /// Whole-request deadline for search endpoints
    pub search_deadline: Option<Duration>,
    /// Cancelled on shutdown; in-flight searches stop
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(pipeline: DiscoveryPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            search_deadline: None,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_search_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.search_deadline = deadline;
        self
    }

    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

/// Build the discovery pipeline from configuration.
///
/// Optional backends are probed once here; the result decides which
/// stages run for the lifetime of the process.
pub async fn build_pipeline(config: &Config) -> DiscoveryPipeline {
    let pipeline_config = config.pipeline_config();

    let searcher: Arc<dyn MetaSearcher> =
        Arc::new(SearxngSearcher::new(pipeline_config.searxng_url.clone()));

    let fetcher: Option<Arc<dyn PageFetcher>> = if config.scraping_enabled {
        let mut fetcher = HttpFetcher::new();
        if let Some(url) = &config.scraping_probe_url {
            fetcher = fetcher.with_probe_url(url.clone());
        }
        Some(Arc::new(fetcher))
    } else {
        tracing::info!("Scraping disabled by configuration");
        None
    };

    let model: Option<Arc<dyn ExtractionModel>> = match &config.openai_api_key {
        Some(key) => {
            let mut model = OpenAiModel::new(key.clone()).with_model(config.openai_model.clone());
            if let Some(url) = &config.openai_base_url {
                model = model.with_base_url(url.clone());
            }
            Some(Arc::new(model))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, results will come from search hits only");
            None
        }
    };

    let capabilities = Capabilities::probe(fetcher.as_ref(), model.as_ref()).await;

    let mut pipeline = DiscoveryPipeline::new(searcher, pipeline_config);
    if let Some(fetcher) = fetcher {
        pipeline = pipeline.with_fetcher(fetcher);
    }
    if let Some(model) = model {
        pipeline = pipeline.with_model(model);
    }
    pipeline.with_capabilities(capabilities)
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/jobs/search", post(search_handler))
        .route("/jobs/search-india", post(search_handler))
        .route("/jobs/platforms", get(platforms_handler))
        .route("/jobs/categories", get(categories_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
