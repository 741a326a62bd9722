//! Generative extraction service implementations.

mod openai;

pub use openai::OpenAiModel;

pub use crate::traits::model::ExtractionModel;
