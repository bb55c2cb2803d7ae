//! Multi-day counting driver.
//!
//! Days are swept most recent first, every category once per day in
//! configuration order. Each category's page cursor is carried from one day
//! to the next, so an older day resumes on the page where the newer day
//! stopped. A finished day is handed to the sink before the next day starts.

use adtally_core::LabelMerge;
use adtally_scraper::{CategoryScanner, LabelCounts, ListingSource};
use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};

use crate::report::DayReport;

/// Aggregated totals returned by [`run_days`].
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RunTotals {
    pub days: usize,
    pub listings_counted: u64,
    pub pages_fetched: u64,
}

/// Counts every category for each date in `target_dates`, passing each
/// finished [`DayReport`] to `sink`.
///
/// `target_dates` must be ordered most recent first. Every category starts
/// at page 1 on the first date.
///
/// # Errors
///
/// Returns the first fetch failure (after retries) or sink failure. Reports
/// already handed to `sink` stay written.
pub(crate) async fn run_days<S, F>(
    source: &S,
    scanners: &[CategoryScanner],
    target_dates: &[NaiveDate],
    now: NaiveDateTime,
    mut sink: F,
) -> anyhow::Result<RunTotals>
where
    S: ListingSource,
    F: FnMut(&DayReport) -> anyhow::Result<()>,
{
    let mut cursors = vec![1u32; scanners.len()];
    let mut totals = RunTotals::default();

    for &date in target_dates {
        let mut categories = Vec::with_capacity(scanners.len());

        for (scanner, cursor) in scanners.iter().zip(cursors.iter_mut()) {
            let category = scanner.category();
            let outcome = scanner
                .scan(source, *cursor, date, now)
                .await
                .with_context(|| format!("counting {} for {date}", category.slug))?;

            *cursor = outcome.next_start_page;
            totals.listings_counted += outcome.listings_counted;
            totals.pages_fetched += u64::from(outcome.pages_fetched);

            let mut counts = outcome.counts;
            apply_merges(&mut counts, &category.merge);
            categories.push((category.slug.clone(), counts));
        }

        let report = DayReport { date, categories };
        sink(&report).with_context(|| format!("writing report for {date}"))?;
        totals.days += 1;
        tracing::info!(%date, "day complete");
    }

    Ok(totals)
}

/// Folds each merge's source labels into its target label.
pub(crate) fn apply_merges(counts: &mut LabelCounts, merges: &[LabelMerge]) {
    for merge in merges {
        counts.merge_labels(&merge.into, &merge.from);
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
