//! Upstream marketplace clients and the combined-search aggregator.
//!
//! One client per upstream API (Amazon scraping proxy, structured Walmart
//! endpoint, eBay Browse API), each performing a single attempt per call and
//! mapping its response into the canonical [`shopsearch_core::Product`].
//! [`aggregate::combined_search`] fans a query out to all configured clients
//! concurrently and merges the outcomes.

pub mod aggregate;
pub mod amazon;
pub mod ebay;
pub mod error;
mod http;
pub mod normalize;
pub mod types;
pub mod walmart;

pub use aggregate::{combined_search, BySource, SearchResult, SourceTally};
pub use amazon::AmazonClient;
pub use ebay::EbayClient;
pub use error::ProviderError;
pub use walmart::WalmartClient;
