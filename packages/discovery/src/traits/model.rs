//! Generative extraction service trait.

use async_trait::async_trait;

use crate::error::ModelResult;

/// A text-in, text-out generative model used for structured extraction.
#[async_trait]
pub trait ExtractionModel: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> ModelResult<String>;

    /// Capability probe, run once at startup. Defaults to available.
    async fn probe(&self) -> bool {
        true
    }

    /// Model name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
