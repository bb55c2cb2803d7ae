pub mod client;
pub mod error;
pub mod rate_limit;
pub mod resolver;
pub mod scan;
pub mod source;
pub mod timestamp;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{FeedEndpoints, ListingClient};
pub use error::ScraperError;
pub use rate_limit::RetryPolicy;
pub use resolver::{LabelMatch, LabelResolver, UNKNOWN_BRAND_LABEL};
pub use scan::{CategoryScanner, ScanOutcome};
pub use source::ListingSource;
pub use timestamp::{classify, classify_at, ClassificationVerdict};
pub use types::{FeedResponse, LabelCounts, Listing};
