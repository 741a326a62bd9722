//! Plain HTTP page fetcher.
//!
//! Fetches with reqwest, parses with `scraper`, and keeps only the main
//! content area as line-structured text. No JavaScript rendering.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;

/// Elements whose text never contributes to page content.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "nav", "header", "footer", "aside", "form",
];

/// Elements that start a new line in the extracted text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "tr", "table", "br", "h1", "h2",
    "h3", "h4", "h5", "h6", "dt", "dd", "blockquote", "pre",
];

/// Candidate containers for the main content, most specific first.
const MAIN_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#content",
    "#main",
    ".job-description",
    ".content",
    "body",
];

/// Fetcher that downloads HTML and reduces it to readable text.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    probe_url: Option<String>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        // Browser-like User-Agent; job boards reject obvious bots
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-IN,en;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();

        Self {
            client,
            probe_url: None,
        }
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// URL fetched by [`PageFetcher::probe`]. Without one the probe only
    /// checks that the fetcher could be built.
    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = Some(url.into());
        self
    }

    /// Reduce an HTML document to the text of its main content area.
    pub fn html_to_text(html: &str) -> String {
        let document = Html::parse_document(html);

        let root = MAIN_SELECTORS.iter().find_map(|s| {
            let selector = Selector::parse(s).ok()?;
            document.select(&selector).next()
        });

        let mut out = String::new();
        match root {
            Some(root) => collect_text(root, &mut out),
            None => collect_text(document.root_element(), &mut out),
        }
        out
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if SKIPPED_TAGS.iter().any(|t| *t == name) {
                continue;
            }
            let block = BLOCK_TAGS.iter().any(|t| *t == name);
            if block {
                out.push('\n');
            }
            collect_text(child_el, out);
            if block {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let text = Self::html_to_text(&html);
        if text.trim().is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }

        Ok(text)
    }

    async fn probe(&self) -> bool {
        let Some(url) = &self.probe_url else {
            return true;
        };

        match self.fetch(url, Duration::from_secs(10)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(url = %url, error = %e, "Page fetcher probe failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_main_content() {
        let html = r#"
            <html><head><title>Jobs</title><script>var x = 1;</script></head>
            <body>
              <nav>Home | Login</nav>
              <main>
                <h1>Python Developer</h1>
                <p>Acme Corp, Bengaluru</p>
                <ul><li>Django</li><li>FastAPI</li></ul>
              </main>
              <footer>Privacy</footer>
            </body></html>
        "#;

        let text = HttpFetcher::html_to_text(html);
        assert!(text.contains("Python Developer"));
        assert!(text.contains("Acme Corp, Bengaluru"));
        assert!(text.contains("Django"));
        assert!(!text.contains("Login"));
        assert!(!text.contains("Privacy"));
        assert!(!text.contains("var x"));
    }

    #[test]
    fn test_body_fallback_skips_boilerplate() {
        let html = r#"
            <html><body>
              <header>Sign in</header>
              <div>Stipend: 10,000/month</div>
              <style>.a { color: red; }</style>
            </body></html>
        "#;

        let text = HttpFetcher::html_to_text(html);
        assert!(text.contains("Stipend: 10,000/month"));
        assert!(!text.contains("Sign in"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_blocks_break_lines() {
        let text = HttpFetcher::html_to_text("<main><p>one</p><p>two</p></main>");
        let lines: Vec<_> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_probe_without_url_is_available() {
        assert!(HttpFetcher::new().probe().await);
    }

    #[tokio::test]
    async fn test_probe_with_unreachable_url_fails() {
        let fetcher = HttpFetcher::new().with_probe_url("http://127.0.0.1:1/");
        assert!(!fetcher.probe().await);
    }
}
