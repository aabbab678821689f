pub mod content_aggregator;
pub mod data_persistence;
pub mod droid;
pub mod field_extractor;
pub mod link_discoverer;
pub mod openai_client;
pub mod page_fetcher;

pub use content_aggregator::*;
pub use data_persistence::*;
pub use droid::*;
pub use field_extractor::*;
pub use link_discoverer::*;
pub use openai_client::*;
pub use page_fetcher::*;
