//! Bounded-concurrency page fetching with per-page failure isolation.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::traits::fetcher::PageFetcher;
use crate::types::page::ScrapedPage;

/// Fetches pages in batches of `batch_size`, each page under its own timeout.
///
/// A failed, empty, timed-out or panicking fetch yields no page and leaves
/// its siblings untouched. Dropping the future aborts in-flight fetches.
#[derive(Clone)]
pub struct BatchScraper {
    fetcher: Arc<dyn PageFetcher>,
    batch_size: usize,
    page_timeout: Duration,
    char_budget: usize,
}

impl BatchScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            batch_size: 5,
            page_timeout: Duration::from_secs(30),
            char_budget: 6_000,
        }
    }

    /// Set the batch size. Zero is clamped to one.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    /// Scrape `urls`, returning pages in input order.
    pub async fn scrape(&self, urls: &[String]) -> Vec<ScrapedPage> {
        let mut pages = Vec::with_capacity(urls.len());

        for (batch_no, batch) in urls.chunks(self.batch_size).enumerate() {
            let mut set = JoinSet::new();
            for (idx, url) in batch.iter().enumerate() {
                let fetcher = Arc::clone(&self.fetcher);
                let url = url.clone();
                let timeout = self.page_timeout;
                let budget = self.char_budget;
                set.spawn(async move { (idx, fetch_page(fetcher, url, timeout, budget).await) });
            }

            let mut batch_pages: Vec<(usize, ScrapedPage)> = Vec::with_capacity(batch.len());
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok((idx, Some(page))) => batch_pages.push((idx, page)),
                    Ok((_, None)) => {}
                    Err(e) => warn!(error = %e, "Page fetch task aborted"),
                }
            }
            batch_pages.sort_by_key(|(idx, _)| *idx);

            debug!(
                batch = batch_no,
                requested = batch.len(),
                scraped = batch_pages.len(),
                "Batch complete"
            );
            pages.extend(batch_pages.into_iter().map(|(_, page)| page));
        }

        info!(
            fetcher = self.fetcher.name(),
            requested = urls.len(),
            scraped = pages.len(),
            "Scraping complete"
        );
        pages
    }
}

async fn fetch_page(
    fetcher: Arc<dyn PageFetcher>,
    url: String,
    timeout: Duration,
    budget: usize,
) -> Option<ScrapedPage> {
    let result = match tokio::time::timeout(timeout, fetcher.fetch(&url, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout { url: url.clone() }),
    };

    match result {
        Ok(raw) => {
            let page = ScrapedPage::new(url, &raw, budget);
            if page.text.is_empty() {
                debug!(url = %page.url, "Page had no text");
                None
            } else {
                Some(page)
            }
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Page fetch failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://unstop.com/hackathons/{i}")).collect()
    }

    #[tokio::test]
    async fn test_one_failure_is_isolated() {
        let urls = urls(5);
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_default_page("Smart India Hackathon registration open")
                .fail_url(&urls[2]),
        );
        let scraper = BatchScraper::new(fetcher.clone());

        let pages = scraper.scrape(&urls).await;

        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|p| p.url != urls[2]));
        assert_eq!(fetcher.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_pages_keep_input_order_across_batches() {
        let urls = urls(7);
        let fetcher = Arc::new(MockFetcher::new().with_default_page("content"));
        let scraper = BatchScraper::new(fetcher).with_batch_size(3);

        let pages = scraper.scrape(&urls).await;
        let got: Vec<_> = pages.iter().map(|p| p.url.clone()).collect();
        assert_eq!(got, urls);
    }

    #[tokio::test]
    async fn test_slow_page_times_out_alone() {
        let urls = urls(3);
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_default_page("content")
                .with_delay(&urls[0], Duration::from_secs(5)),
        );
        let scraper = BatchScraper::new(fetcher).with_page_timeout(Duration::from_millis(50));

        let pages = scraper.scrape(&urls).await;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, urls[1]);
    }

    #[tokio::test]
    async fn test_text_is_normalized_and_truncated() {
        let url = "https://devpost.com/hackathons/x".to_string();
        let fetcher = Arc::new(MockFetcher::new().with_page(&url, "a   b\n\n\n\n\nc"));
        let scraper = BatchScraper::new(fetcher).with_char_budget(4);

        let pages = scraper.scrape(&[url]).await;
        assert_eq!(pages[0].text, "a b\n");
    }

    #[tokio::test]
    async fn test_empty_page_is_dropped() {
        let url = "https://devpost.com/hackathons/x".to_string();
        let fetcher = Arc::new(MockFetcher::new().with_page(&url, "  \n \n"));
        let pages = BatchScraper::new(fetcher).scrape(&[url]).await;
        assert!(pages.is_empty());
    }
}
