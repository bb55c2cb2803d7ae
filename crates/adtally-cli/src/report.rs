//! Per-day spreadsheet reports.
//!
//! One workbook per target date, one row block per category:
//!
//! | A          | B         | C  |
//! |------------|-----------|----|
//! | `tvs`      | `lg`      | 4  |
//! |            | `samsung` | 11 |
//! |            |           |    |
//! | `computers-tablets` | `apple` | 0 |
//!
//! A category with no counted listings occupies a single row holding only
//! its slug.

use std::path::{Path, PathBuf};

use adtally_scraper::LabelCounts;
use anyhow::Context;
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

/// Counts for one target date, in configured category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DayReport {
    pub date: NaiveDate,
    pub categories: Vec<(String, LabelCounts)>,
}

impl DayReport {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.date.format("%Y-%m-%d"))
    }
}

/// One spreadsheet row; `None` cells are left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportRow<'a> {
    pub category: Option<&'a str>,
    pub label: Option<&'a str>,
    pub count: Option<u64>,
}

const BLANK: ReportRow<'static> = ReportRow {
    category: None,
    label: None,
    count: None,
};

/// Lays `report` out as rows, with one blank row between category blocks.
pub(crate) fn report_rows(report: &DayReport) -> Vec<ReportRow<'_>> {
    let mut rows = Vec::new();

    for (i, (slug, counts)) in report.categories.iter().enumerate() {
        if i > 0 {
            rows.push(BLANK);
        }
        if counts.is_empty() {
            rows.push(ReportRow {
                category: Some(slug.as_str()),
                ..BLANK
            });
            continue;
        }
        for (j, (label, count)) in counts.iter().enumerate() {
            rows.push(ReportRow {
                category: (j == 0).then_some(slug.as_str()),
                label: Some(label),
                count: Some(count),
            });
        }
    }

    rows
}

/// Writes `report` to `<dir>/<YYYY-MM-DD>.xlsx`, replacing any earlier file.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built or saved.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn write_day_report(dir: &Path, report: &DayReport) -> anyhow::Result<PathBuf> {
    let path = dir.join(report.file_name());
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(report.date.format("%Y-%m-%d").to_string())?;

    for (row, cells) in (0u32..).zip(report_rows(report)) {
        if let Some(category) = cells.category {
            worksheet.write_string(row, 0, category)?;
        }
        if let Some(label) = cells.label {
            worksheet.write_string(row, 1, label)?;
        }
        if let Some(count) = cells.count {
            worksheet.write_number(row, 2, count as f64)?;
        }
    }

    workbook
        .save(&path)
        .with_context(|| format!("saving report {}", path.display()))?;
    tracing::debug!(path = %path.display(), "report written");
    Ok(path)
}
