use anyhow::{Context, Result};
use discovery::security::SecretString;
use discovery::PipelineConfig;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub searxng_url: String,
    pub searxng_timeout_secs: u64,
    pub max_search_queries: usize,
    pub max_scrape_urls: usize,
    pub scraping_batch_size: usize,
    pub scraping_enabled: bool,
    /// Page fetched once at startup to confirm scraping works
    pub scraping_probe_url: Option<String>,
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    /// Whole-request deadline for search endpoints
    pub search_deadline: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            port: 8000,
            searxng_url: pipeline.searxng_url,
            searxng_timeout_secs: pipeline.search_timeout.as_secs(),
            max_search_queries: pipeline.max_queries,
            max_scrape_urls: pipeline.max_scrape_urls,
            scraping_batch_size: pipeline.batch_size,
            scraping_enabled: true,
            scraping_probe_url: None,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: None,
            search_deadline: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            searxng_url: env::var("SEARXNG_URL").unwrap_or(defaults.searxng_url),
            searxng_timeout_secs: parse_var("SEARXNG_TIMEOUT_SECS", defaults.searxng_timeout_secs)?,
            max_search_queries: parse_var("MAX_SEARCH_QUERIES", defaults.max_search_queries)?,
            max_scrape_urls: parse_var("MAX_SCRAPE_URLS", defaults.max_scrape_urls)?,
            scraping_batch_size: parse_var("SCRAPING_BATCH_SIZE", defaults.scraping_batch_size)?,
            scraping_enabled: parse_bool("SCRAPING_ENABLED", defaults.scraping_enabled)?,
            scraping_probe_url: env::var("SCRAPING_PROBE_URL")
                .ok()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(SecretString::new)
                .filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            search_deadline: env::var("SEARCH_DEADLINE_SECS")
                .ok()
                .map(|v| {
                    v.parse::<u64>()
                        .context("SEARCH_DEADLINE_SECS must be a number of seconds")
                })
                .transpose()?
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }

    /// Pipeline settings derived from this configuration
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_searxng_url(self.searxng_url.clone())
            .with_search_timeout(Duration::from_secs(self.searxng_timeout_secs))
            .with_max_queries(self.max_search_queries)
            .with_max_scrape_urls(self.max_scrape_urls)
            .with_batch_size(self.scraping_batch_size)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("{name} must be a boolean, got {other:?}"),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_from_defaults() {
        let config = Config {
            max_search_queries: 8,
            scraping_batch_size: 0,
            ..Config::default()
        };
        let pipeline = config.pipeline_config();

        assert_eq!(pipeline.max_queries, 8);
        assert_eq!(pipeline.batch_size, 1);
        assert_eq!(pipeline.search_timeout, Duration::from_secs(10));
        assert_eq!(pipeline.searxng_url, "http://localhost:8080");
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = Config {
            openai_api_key: Some(SecretString::new("sk-test-123")),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("sk-test-123"));
    }
}
