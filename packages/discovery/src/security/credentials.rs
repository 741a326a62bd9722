//! API keys for the extraction service, kept out of logs and `Debug` output.
//!
//! The server reads `OPENAI_API_KEY` into a [`SecretString`] and hands it to
//! [`OpenAiModel`](crate::ai::OpenAiModel) unexposed; the key only leaves the
//! wrapper when the `Authorization` header is built.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key that prints as `[REDACTED]`.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// `Authorization` header value for bearer-token APIs.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose().trim())
    }

    /// Blank keys count as missing.
    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_redacted() {
        let key = SecretString::new("sk-live-123");
        assert_eq!(format!("{:?}", key), "[REDACTED]");
        assert_eq!(format!("{}", key), "[REDACTED]");
        assert_eq!(key.expose(), "sk-live-123");
    }

    #[test]
    fn test_bearer_header_trims_key() {
        let key = SecretString::new(" sk-live-123\n");
        assert_eq!(key.bearer(), "Bearer sk-live-123");
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(SecretString::new("   ").is_empty());
        assert!(!SecretString::new("k").is_empty());
    }
}
