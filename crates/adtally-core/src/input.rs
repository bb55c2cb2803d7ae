//! Validation of the run request typed at the prompt or passed as a flag.
//!
//! A run covers either one explicit calendar date or a contiguous range of
//! days ending today. Both forms are bounded by how far back the listing feed
//! can usefully be paged.

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// Largest accepted day count; a count of `n` covers today plus `n` earlier days.
pub const MAX_DAY_COUNT: u32 = 59;

/// Oldest accepted explicit date, in days before today.
pub const MAX_DATE_AGE_DAYS: i64 = 60;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is neither a day count nor a date in YYYY-MM-DD format")]
    Malformed(String),

    #[error("day count {0} is out of range; enter a number from 0 to 59")]
    DayCountOutOfRange(i64),

    #[error("{0} is in the future")]
    FutureDate(NaiveDate),

    #[error("{0} is more than 60 days in the past")]
    DateTooOld(NaiveDate),
}

/// What the caller asked to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRequest {
    /// Count a single calendar date.
    Date(NaiveDate),
    /// Count today and the `n` days before it.
    Days(u32),
}

impl RunRequest {
    /// Target dates in scan order: most recent first.
    ///
    /// The listing feed is newest-first, so this order lets each category's
    /// page cursor only ever move forward.
    #[must_use]
    pub fn target_dates(self, today: NaiveDate) -> Vec<NaiveDate> {
        match self {
            RunRequest::Date(date) => vec![date],
            RunRequest::Days(count) => (0..=u64::from(count))
                .filter_map(|i| today.checked_sub_days(Days::new(i)))
                .collect(),
        }
    }
}

/// Parses a day count and checks it lies in `0..=MAX_DAY_COUNT`.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] for non-numeric input and
/// [`InputError::DayCountOutOfRange`] for integers outside the range.
pub fn parse_day_count(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| InputError::Malformed(trimmed.to_string()))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_DAY_COUNT)
        .ok_or(InputError::DayCountOutOfRange(value))
}

/// Parses a `YYYY-MM-DD` date and checks it is neither in the future nor
/// more than [`MAX_DATE_AGE_DAYS`] before `today`.
///
/// # Errors
///
/// Returns [`InputError::Malformed`], [`InputError::FutureDate`] or
/// [`InputError::DateTooOld`].
pub fn parse_target_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, InputError> {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| InputError::Malformed(trimmed.to_string()))?;
    if date > today {
        return Err(InputError::FutureDate(date));
    }
    if (today - date).num_days() > MAX_DATE_AGE_DAYS {
        return Err(InputError::DateTooOld(date));
    }
    Ok(date)
}

/// Interprets free-form prompt input: anything that parses as an integer is a
/// day count, everything else must be a date.
///
/// # Errors
///
/// Propagates the error from [`parse_day_count`] or [`parse_target_date`].
pub fn parse_run_request(raw: &str, today: NaiveDate) -> Result<RunRequest, InputError> {
    let trimmed = raw.trim();
    if trimmed.parse::<i64>().is_ok() {
        parse_day_count(trimmed).map(RunRequest::Days)
    } else {
        parse_target_date(trimmed, today).map(RunRequest::Date)
    }
}
