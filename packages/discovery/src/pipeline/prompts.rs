//! Prompt for structured listing extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::category::Category;
use crate::types::page::{truncate_chars, ScrapedPage};

/// Separator between pages in the extraction prompt.
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Prompt asking for every listing of one category as a bare JSON array.
pub const EXTRACT_LISTINGS_PROMPT: &str = r#"Extract ALL {category} listings from this content.

Return ONLY a JSON array matching this schema:
{schema}

Rules:
- One array element per distinct listing
- Copy links exactly as they appear in the content
- Leave a field out when the content does not state it
- Return [] if there are no listings

Content:
{content}

Output JSON array only:"#;

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").unwrap();
}

/// Format the extraction prompt for `pages`.
///
/// Pages are rendered with their source URL, joined, and the joined content
/// is cut to `char_budget` characters.
pub fn format_extraction_prompt(
    category: Category,
    schema: &str,
    pages: &[ScrapedPage],
    char_budget: usize,
) -> String {
    let combined = pages
        .iter()
        .map(ScrapedPage::render)
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR);

    EXTRACT_LISTINGS_PROMPT
        .replace("{category}", category.noun())
        .replace("{schema}", schema)
        .replace("{content}", truncate_chars(&combined, char_budget))
}

/// Strip a surrounding markdown code fence, if any.
pub fn clean_json_response(response: &str) -> &str {
    let trimmed = response.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => trimmed,
    }
}
