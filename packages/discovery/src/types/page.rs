//! Scraped page content handed to the extractor.

use serde::{Deserialize, Serialize};

/// Cleaned, truncated text of one fetched page, tagged with its source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub url: String,
    pub text: String,
}

impl ScrapedPage {
    /// Normalize whitespace in `raw` and truncate it to `char_budget` chars.
    pub fn new(url: impl Into<String>, raw: &str, char_budget: usize) -> Self {
        Self {
            url: url.into(),
            text: truncate_chars(&normalize_whitespace(raw), char_budget).to_string(),
        }
    }

    /// Text as it appears in the extraction prompt.
    pub fn render(&self) -> String {
        format!("Source: {}\n\n{}", self.url, self.text)
    }
}

/// Collapse horizontal whitespace runs to one space and 3+ newlines to two.
pub fn normalize_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut newlines = 0usize;

    for line in raw.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            newlines += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if newlines > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(&line);
        newlines = 0;
    }

    out
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let raw = "Title\n\n\n\n\nBody   text\twith  gaps\nnext line";
        assert_eq!(
            normalize_whitespace(raw),
            "Title\n\nBody text with gaps\nnext line"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "₹10,000/month";
        assert_eq!(truncate_chars(s, 3), "₹10");
        assert_eq!(truncate_chars(s, 100), s);
    }

    #[test]
    fn test_page_is_budgeted_and_rendered() {
        let page = ScrapedPage::new("https://unstop.com/h/1", &"a".repeat(50), 10);
        assert_eq!(page.text.len(), 10);
        assert!(page.render().starts_with("Source: https://unstop.com/h/1\n\n"));
    }
}
