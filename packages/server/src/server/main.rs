// Main entry point for API server

use anyhow::{Context, Result};
use server_core::{
    server::{build_app, build_pipeline, AppState},
    Config,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,discovery=debug,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting opportunity discovery API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        searxng_url = %config.searxng_url,
        scraping_enabled = config.scraping_enabled,
        extraction_configured = config.openai_api_key.is_some(),
        "Configuration loaded"
    );

    // Build pipeline (probes optional backends once)
    let pipeline = build_pipeline(&config).await;
    let capabilities = pipeline.capabilities();
    tracing::info!(
        scraping = capabilities.scraping,
        extraction = capabilities.extraction,
        "Pipeline ready"
    );

    let shutdown = CancellationToken::new();
    let state = AppState::new(pipeline)
        .with_search_deadline(config.search_deadline)
        .with_shutdown(shutdown.clone());
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        })
        .await
        .context("Server error")?;

    Ok(())
}
