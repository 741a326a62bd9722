// HTTP routes
pub mod catalog;
pub mod error;
pub mod health;
pub mod search;

pub use catalog::*;
pub use error::*;
pub use health::*;
pub use search::*;
