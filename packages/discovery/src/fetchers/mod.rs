//! Page-fetching backend implementations.

mod http;

pub use http::HttpFetcher;

pub use crate::traits::fetcher::PageFetcher;
