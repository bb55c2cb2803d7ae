//! Classification of a listing's relative timestamp against a target date.
//!
//! The feed is sorted newest-first, so a scan for one calendar day sees, in
//! order: listings newer than the day (skip), listings from the day (count),
//! then the first listing older than the day (stop). Promoted ("bumped")
//! listings can appear anywhere and are always skipped.
//!
//! Recognised shapes, tested in this order:
//!
//! | Shape | Examples | Verdict rule |
//! |-------|----------|--------------|
//! | bump marker | `"bump_up"` | always skip |
//! | day count | `"1 day"`, `"3 days"` | compare `n` with days elapsed since the target |
//! | sub-day | `"45 minutes"`, `"2 hours"`, `"just now"` | compare the calendar date of `now - duration` with the target |
//! | anything else | `"yesterday"`, `""` | skip |

use std::sync::LazyLock;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;

const BUMP_MARKER: &str = "bump_up";

static DAY_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*days?\b").expect("valid day-count regex"));

static SUB_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(minute|hour)s?\b").expect("valid sub-day regex")
});

static JUST_NOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^just\s+now\b").expect("valid just-now regex"));

/// What the scanner should do with a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationVerdict {
    /// The listing belongs to the target day: count it and keep scanning.
    Continue,
    /// The listing is outside the target day but the scan must go on.
    Skip,
    /// The listing is older than the target day; nothing after it can match.
    Stop,
}

/// Parsed form of a relative timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimestampShape {
    Bumped,
    Days(i64),
    Ago(TimeDelta),
    Unrecognized,
}

pub(crate) fn parse_timestamp(raw: &str) -> TimestampShape {
    let text = raw.trim();

    if text.to_ascii_lowercase().contains(BUMP_MARKER) {
        return TimestampShape::Bumped;
    }

    if let Some(caps) = DAY_COUNT_RE.captures(text) {
        return caps[1]
            .parse::<i64>()
            .map_or(TimestampShape::Unrecognized, TimestampShape::Days);
    }

    if let Some(caps) = SUB_DAY_RE.captures(text) {
        let Ok(amount) = caps[1].parse::<i64>() else {
            return TimestampShape::Unrecognized;
        };
        let delta = if caps[2].eq_ignore_ascii_case("hour") {
            TimeDelta::try_hours(amount)
        } else {
            TimeDelta::try_minutes(amount)
        };
        return delta.map_or(TimestampShape::Unrecognized, TimestampShape::Ago);
    }

    if JUST_NOW_RE.is_match(text) {
        return TimestampShape::Ago(TimeDelta::zero());
    }

    TimestampShape::Unrecognized
}

/// Classifies `relative_timestamp` against `target_date` using the local clock.
#[must_use]
pub fn classify(relative_timestamp: &str, target_date: NaiveDate) -> ClassificationVerdict {
    classify_at(relative_timestamp, target_date, Local::now().naive_local())
}

/// Classifies `relative_timestamp` against `target_date` as seen at `now`.
///
/// Unparseable timestamps are skipped, never treated as a stop: stopping on
/// garbage would silently truncate the scan.
#[must_use]
pub fn classify_at(
    relative_timestamp: &str,
    target_date: NaiveDate,
    now: NaiveDateTime,
) -> ClassificationVerdict {
    match parse_timestamp(relative_timestamp) {
        TimestampShape::Bumped => ClassificationVerdict::Skip,
        TimestampShape::Days(n) => {
            let elapsed_days = (now.date() - target_date).num_days();
            match n.cmp(&elapsed_days) {
                std::cmp::Ordering::Equal => ClassificationVerdict::Continue,
                std::cmp::Ordering::Greater => ClassificationVerdict::Stop,
                std::cmp::Ordering::Less => ClassificationVerdict::Skip,
            }
        }
        TimestampShape::Ago(delta) => {
            let Some(posted_at) = now.checked_sub_signed(delta) else {
                return ClassificationVerdict::Skip;
            };
            match posted_at.date().cmp(&target_date) {
                std::cmp::Ordering::Equal => ClassificationVerdict::Continue,
                std::cmp::Ordering::Less => ClassificationVerdict::Stop,
                std::cmp::Ordering::Greater => ClassificationVerdict::Skip,
            }
        }
        TimestampShape::Unrecognized => {
            tracing::debug!(
                timestamp = relative_timestamp,
                "unparseable listing timestamp; skipping"
            );
            ClassificationVerdict::Skip
        }
    }
}

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod tests;
