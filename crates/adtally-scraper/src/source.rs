//! The seam between the category scanner and wherever listings come from.
//!
//! [`crate::ListingClient`] is the HTTP implementation. Tests drive the
//! scanner with in-memory sources.
//!
//! Implementations may assume pages are requested one at a time. The scanner
//! relies on the source returning listings newest-first, but that ordering
//! is never checked.

use adtally_core::CategoryConfig;

use crate::error::ScraperError;
use crate::types::Listing;

#[allow(async_fn_in_trait)]
pub trait ListingSource {
    /// Fetches one 1-based page of `category`'s feed. An empty page means the
    /// feed is exhausted.
    async fn fetch_page(
        &self,
        category: &CategoryConfig,
        page: u32,
    ) -> Result<Vec<Listing>, ScraperError>;

    /// Fetches the listing's detail page and returns its attribute values in
    /// document order.
    async fn fetch_detail_attributes(&self, identifier: &str) -> Result<Vec<String>, ScraperError>;
}
