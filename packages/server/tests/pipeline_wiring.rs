//! Startup wiring: which optional stages survive the capability probe.

use server_core::{server::build_pipeline, Config};

#[tokio::test]
async fn scraping_enabled_without_probe_url_is_trusted() {
    let config = Config::default();

    let pipeline = build_pipeline(&config).await;

    assert!(pipeline.capabilities().scraping);
    assert!(!pipeline.capabilities().extraction);
}

#[tokio::test]
async fn failed_scraping_probe_disables_scraping() {
    let config = Config {
        scraping_probe_url: Some("http://127.0.0.1:1/".to_string()),
        ..Config::default()
    };

    let pipeline = build_pipeline(&config).await;

    assert!(!pipeline.capabilities().scraping);
}

#[tokio::test]
async fn disabled_scraping_skips_the_probe() {
    let config = Config {
        scraping_enabled: false,
        scraping_probe_url: Some("http://127.0.0.1:1/".to_string()),
        ..Config::default()
    };

    let pipeline = build_pipeline(&config).await;

    assert!(!pipeline.capabilities().scraping);
}
