//! One-shot structured extraction over scraped pages.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts::{clean_json_response, format_extraction_prompt};
use crate::catalog::CategoryProfile;
use crate::traits::model::ExtractionModel;
use crate::types::category::Category;
use crate::types::listing::ExtractedListing;
use crate::types::page::ScrapedPage;

/// Turns scraped pages into category-typed listings with a single model call.
///
/// Never fails: a service error, a non-array response or an array with no
/// usable entries all yield an empty list. No retries.
#[derive(Clone)]
pub struct StructuredExtractor {
    model: Arc<dyn ExtractionModel>,
    max_pages: usize,
    char_budget: usize,
}

impl StructuredExtractor {
    pub fn new(model: Arc<dyn ExtractionModel>) -> Self {
        Self {
            model,
            max_pages: 5,
            char_budget: 50_000,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }

    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    pub async fn extract(
        &self,
        profile: &CategoryProfile,
        pages: &[ScrapedPage],
    ) -> Vec<ExtractedListing> {
        if pages.is_empty() {
            return Vec::new();
        }

        let pages = &pages[..pages.len().min(self.max_pages)];
        let prompt =
            format_extraction_prompt(profile.category, &profile.schema, pages, self.char_budget);
        debug!(
            model = self.model.name(),
            pages = pages.len(),
            prompt_chars = prompt.chars().count(),
            "Requesting extraction"
        );

        let response = match self.model.complete(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "Extraction service failed");
                return Vec::new();
            }
        };

        match parse_listings(profile.category, &response) {
            Some(listings) => {
                info!(
                    category = %profile.category,
                    listings = listings.len(),
                    "Extraction complete"
                );
                listings
            }
            None => {
                warn!(
                    response_chars = response.len(),
                    "Extraction response was not a JSON array"
                );
                Vec::new()
            }
        }
    }
}

/// Parse a model response into listings.
///
/// `None` when the (fence-stripped) response is not a JSON array. Elements
/// that miss the category's required fields are dropped.
pub fn parse_listings(category: Category, response: &str) -> Option<Vec<ExtractedListing>> {
    let Value::Array(items) = serde_json::from_str::<Value>(clean_json_response(response)).ok()? else {
        return None;
    };

    let total = items.len();
    let listings: Vec<ExtractedListing> = items
        .into_iter()
        .filter_map(|item| ExtractedListing::from_value(category, item))
        .collect();

    if listings.len() < total {
        debug!(
            dropped = total - listings.len(),
            kept = listings.len(),
            "Dropped incomplete listings"
        );
    }
    Some(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SiteCatalog;
    use crate::testing::MockModel;

    fn pages(n: usize) -> Vec<ScrapedPage> {
        (0..n)
            .map(|i| ScrapedPage::new(format!("https://devpost.com/h/{i}"), "Hackathon page", 1000))
            .collect()
    }

    #[test]
    fn test_parse_fenced_array() {
        let response = r#"```json
[
  {"event_name": "HackIndia", "organizer": "HackIndia", "registration_link": "https://devfolio.co/hackindia"},
  {"event_name": "No link"}
]
```"#;
        let listings = parse_listings(Category::Hackathon, response).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title(), "HackIndia");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_listings(Category::Job, "Sorry, I cannot help with that.").is_none());
        assert!(parse_listings(Category::Job, r#"{"role": "x"}"#).is_none());
        assert_eq!(parse_listings(Category::Job, "[]").unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_only_first_pages_reach_the_prompt() {
        let model = Arc::new(MockModel::new().with_response("[]"));
        let extractor = StructuredExtractor::new(model.clone()).with_max_pages(2);
        let profile = SiteCatalog::global().profile(Category::Hackathon);

        extractor.extract(profile, &pages(4)).await;

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("https://devpost.com/h/1"));
        assert!(!prompts[0].contains("https://devpost.com/h/2"));
    }

    #[tokio::test]
    async fn test_service_error_yields_nothing() {
        let model = Arc::new(MockModel::new().failing("rate limited"));
        let extractor = StructuredExtractor::new(model);
        let profile = SiteCatalog::global().profile(Category::Job);

        assert!(extractor.extract(profile, &pages(2)).await.is_empty());
    }

    #[tokio::test]
    async fn test_no_pages_no_call() {
        let model = Arc::new(MockModel::new().with_response("[]"));
        let extractor = StructuredExtractor::new(model.clone());
        let profile = SiteCatalog::global().profile(Category::Job);

        assert!(extractor.extract(profile, &[]).await.is_empty());
        assert!(model.prompts().is_empty());
    }
}
