//! Core trait abstractions for the three external backends.
//!
//! The coordinator receives each backend as an `Arc<dyn Trait>` at
//! construction time. Implementations must be stateless and safe to share
//! across concurrent pipeline runs.

pub mod fetcher;
pub mod model;
pub mod searcher;
