// Opportunity discovery - API Core
//
// Thin HTTP surface over the discovery pipeline: search, platform and
// category introspection, health.

pub mod config;
pub mod server;

pub use config::*;
