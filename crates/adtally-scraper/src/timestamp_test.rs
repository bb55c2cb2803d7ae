use chrono::{Days, NaiveTime};

use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn days_before(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
}

/// Mid-afternoon, far from either midnight.
fn afternoon() -> NaiveDateTime {
    today().and_time(NaiveTime::from_hms_opt(15, 0, 0).unwrap())
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    today().and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}

// -----------------------------------------------------------------------
// parse_timestamp
// -----------------------------------------------------------------------

#[test]
fn parses_day_counts() {
    assert_eq!(parse_timestamp("1 day"), TimestampShape::Days(1));
    assert_eq!(parse_timestamp("3 days"), TimestampShape::Days(3));
    assert_eq!(parse_timestamp(" 12 Days ago"), TimestampShape::Days(12));
}

#[test]
fn parses_sub_day_durations() {
    assert_eq!(
        parse_timestamp("45 minutes"),
        TimestampShape::Ago(TimeDelta::try_minutes(45).unwrap())
    );
    assert_eq!(
        parse_timestamp("1 minute"),
        TimestampShape::Ago(TimeDelta::try_minutes(1).unwrap())
    );
    assert_eq!(
        parse_timestamp("2 hours"),
        TimestampShape::Ago(TimeDelta::try_hours(2).unwrap())
    );
    assert_eq!(
        parse_timestamp("Just now"),
        TimestampShape::Ago(TimeDelta::zero())
    );
}

#[test]
fn bump_marker_wins_over_other_shapes() {
    assert_eq!(parse_timestamp("bump_up"), TimestampShape::Bumped);
    assert_eq!(parse_timestamp("3 days bump_up"), TimestampShape::Bumped);
}

#[test]
fn unknown_shapes_are_unrecognized() {
    assert_eq!(parse_timestamp(""), TimestampShape::Unrecognized);
    assert_eq!(parse_timestamp("yesterday"), TimestampShape::Unrecognized);
    assert_eq!(parse_timestamp("days 3"), TimestampShape::Unrecognized);
    assert_eq!(parse_timestamp("3 weeks"), TimestampShape::Unrecognized);
    assert_eq!(
        parse_timestamp("99999999999999999999 days"),
        TimestampShape::Unrecognized
    );
    assert_eq!(
        parse_timestamp("99999999999999 hours"),
        TimestampShape::Unrecognized
    );
}

// -----------------------------------------------------------------------
// Day counts
// -----------------------------------------------------------------------

#[test]
fn day_count_examples() {
    assert_eq!(
        classify_at("2 days", days_before(2), afternoon()),
        ClassificationVerdict::Continue
    );
    assert_eq!(
        classify_at("5 days", days_before(2), afternoon()),
        ClassificationVerdict::Stop
    );
    assert_eq!(
        classify_at("1 day", days_before(2), afternoon()),
        ClassificationVerdict::Skip
    );
}

#[test]
fn day_count_matching_elapsed_days_always_continues() {
    for elapsed in 0..=60u64 {
        let target = days_before(elapsed);
        let text = format!("{elapsed} days");
        assert_eq!(
            classify_at(&text, target, afternoon()),
            ClassificationVerdict::Continue,
            "{text} against {target}"
        );
    }
}

#[test]
fn day_count_ordering_against_elapsed_days() {
    for elapsed in 0..=60u64 {
        let target = days_before(elapsed);
        for n in 0..=120u64 {
            let verdict = classify_at(&format!("{n} days"), target, afternoon());
            let expected = match n.cmp(&elapsed) {
                std::cmp::Ordering::Equal => ClassificationVerdict::Continue,
                std::cmp::Ordering::Greater => ClassificationVerdict::Stop,
                std::cmp::Ordering::Less => ClassificationVerdict::Skip,
            };
            assert_eq!(verdict, expected, "n={n} elapsed={elapsed}");
        }
    }
}

#[test]
fn future_target_stops_on_any_day_count() {
    let tomorrow = today().succ_opt().unwrap();
    assert_eq!(
        classify_at("0 days", tomorrow, afternoon()),
        ClassificationVerdict::Stop
    );
}

// -----------------------------------------------------------------------
// Bumped and unparseable
// -----------------------------------------------------------------------

#[test]
fn bumped_listing_is_always_skipped() {
    for elapsed in [0, 1, 30, 59] {
        assert_eq!(
            classify_at("bump_up", days_before(elapsed), afternoon()),
            ClassificationVerdict::Skip
        );
    }
}

#[test]
fn unparseable_timestamp_is_skipped_not_stopped() {
    for text in ["", "yesterday", "a while ago", "-3 days"] {
        assert_eq!(
            classify_at(text, today(), afternoon()),
            ClassificationVerdict::Skip,
            "{text:?}"
        );
    }
}

// -----------------------------------------------------------------------
// Sub-day durations
// -----------------------------------------------------------------------

#[test]
fn just_now_matches_today() {
    assert_eq!(
        classify_at("just now", today(), afternoon()),
        ClassificationVerdict::Continue
    );
}

#[test]
fn just_now_is_newer_than_yesterday() {
    assert_eq!(
        classify_at("just now", days_before(1), afternoon()),
        ClassificationVerdict::Skip
    );
}

#[test]
fn just_now_uses_calendar_date_across_midnight() {
    let before_midnight = days_before(1).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    let after_midnight = at(0, 1);
    let target = days_before(1);
    assert_eq!(
        classify_at("just now", target, before_midnight),
        ClassificationVerdict::Continue
    );
    assert_eq!(
        classify_at("just now", target, after_midnight),
        ClassificationVerdict::Skip
    );
}

#[test]
fn minutes_within_the_same_day_continue() {
    assert_eq!(
        classify_at("45 minutes", today(), afternoon()),
        ClassificationVerdict::Continue
    );
}

#[test]
fn minutes_crossing_midnight_before_target_stop() {
    // 00:30 minus 45 minutes lands on the previous day.
    assert_eq!(
        classify_at("45 minutes", today(), at(0, 30)),
        ClassificationVerdict::Stop
    );
}

#[test]
fn minutes_crossing_midnight_onto_target_continue() {
    assert_eq!(
        classify_at("45 minutes", days_before(1), at(0, 30)),
        ClassificationVerdict::Continue
    );
}

#[test]
fn hours_resolving_after_target_skip() {
    assert_eq!(
        classify_at("2 hours", days_before(1), afternoon()),
        ClassificationVerdict::Skip
    );
}

#[test]
fn hours_reaching_two_days_back_stop() {
    // 01:00 minus 30 hours is 19:00 two days earlier.
    assert_eq!(
        classify_at("30 hours", days_before(1), at(1, 0)),
        ClassificationVerdict::Stop
    );
}
