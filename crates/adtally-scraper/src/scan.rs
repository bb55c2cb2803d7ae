//! Per-category, per-day pagination over the listing feed.

use adtally_core::CategoryConfig;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ScraperError;
use crate::resolver::LabelResolver;
use crate::source::ListingSource;
use crate::timestamp::{classify_at, ClassificationVerdict};
use crate::types::LabelCounts;

/// Result of scanning one category for one target day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub counts: LabelCounts,
    /// Page holding the listing that ended the scan. The next, older target
    /// day for the same category must start here, not one page later.
    pub next_start_page: u32,
    pub pages_fetched: u32,
    pub listings_counted: u64,
}

/// A category paired with its compiled label table.
#[derive(Debug)]
pub struct CategoryScanner {
    category: CategoryConfig,
    resolver: LabelResolver,
}

impl CategoryScanner {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if the category's label
    /// patterns do not compile.
    pub fn new(category: CategoryConfig) -> Result<Self, ScraperError> {
        let resolver = LabelResolver::from_category(&category)?;
        Ok(Self { category, resolver })
    }

    #[must_use]
    pub fn category(&self) -> &CategoryConfig {
        &self.category
    }

    /// Pages through the feed from `start_page` until a listing older than
    /// `target_date` or an empty page is seen, counting every listing posted
    /// on `target_date`.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures from `source` once its retries are spent.
    pub async fn scan<S: ListingSource>(
        &self,
        source: &S,
        start_page: u32,
        target_date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<ScanOutcome, ScraperError> {
        let slug = self.category.slug.as_str();
        let start_page = start_page.max(1);
        tracing::info!(category = slug, %target_date, start_page, "scan started");

        let mut counts = LabelCounts::new();
        let mut listings_counted: u64 = 0;
        let mut pages_fetched: u32 = 0;
        let mut page = start_page;

        'pages: loop {
            let listings = source.fetch_page(&self.category, page).await?;
            pages_fetched += 1;
            tracing::debug!(category = slug, page, listings = listings.len(), "page fetched");

            if listings.is_empty() {
                tracing::debug!(category = slug, page, "empty page; end of feed");
                break;
            }

            for listing in &listings {
                let verdict = classify_at(&listing.relative_timestamp, target_date, now);
                tracing::debug!(
                    category = slug,
                    identifier = %listing.identifier,
                    timestamp = %listing.relative_timestamp,
                    ?verdict,
                    "listing classified"
                );
                match verdict {
                    ClassificationVerdict::Stop => break 'pages,
                    ClassificationVerdict::Skip => {}
                    ClassificationVerdict::Continue => {
                        if let Some(label) =
                            self.resolver.resolve(source, &listing.identifier).await?
                        {
                            counts.increment(&label);
                            listings_counted += 1;
                        }
                    }
                }
            }

            page += 1;
        }

        tracing::info!(
            category = slug,
            %target_date,
            stop_page = page,
            pages_fetched,
            listings_counted,
            "scan stopped"
        );

        Ok(ScanOutcome {
            counts,
            next_start_page: page,
            pages_fetched,
            listings_counted,
        })
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
