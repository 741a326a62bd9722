//! Meta-search backend implementations.

mod searxng;

pub use searxng::SearxngSearcher;

pub use crate::traits::searcher::MetaSearcher;
