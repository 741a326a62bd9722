//! Data types flowing through the pipeline.

pub mod category;
pub mod config;
pub mod hit;
pub mod listing;
pub mod page;
pub mod result;
