//! Listing feed response types and the per-label count aggregate.
//!
//! ## Observed feed shape
//!
//! `GET /data/serp?...` returns a JSON object whose `ads` array holds one
//! object per listing. Only two fields matter here:
//!
//! - `slug`: URL-safe listing identifier, e.g. `"samsung-43-smart-tv-for-sale-colombo"`.
//!   Brand and appliance matching runs against this string.
//! - `timeStamp`: display recency such as `"3 days"`, `"45 minutes"`,
//!   `"just now"`, or `"bump_up"` for promoted listings.
//!
//! All other fields (price, location, images, ...) are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level response from the listing feed.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub ads: Vec<Listing>,
}

/// One ad entry from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Listing {
    #[serde(rename = "slug")]
    pub identifier: String,
    #[serde(rename = "timeStamp")]
    pub relative_timestamp: String,
}

impl Listing {
    #[must_use]
    pub fn new(identifier: impl Into<String>, relative_timestamp: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            relative_timestamp: relative_timestamp.into(),
        }
    }
}

/// Occurrence count per label for one category and one target day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCounts(BTreeMap<String, u64>);

impl LabelCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        *self.0.entry(label.to_owned()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Total number of counted listings across all labels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Removes every label in `from` and records their summed count under
    /// `into`. `into` is written even when the sum is zero.
    pub fn merge_labels(&mut self, into: &str, from: &[String]) {
        let merged: u64 = from.iter().filter_map(|label| self.0.remove(label)).sum();
        *self.0.entry(into.to_owned()).or_insert(0) += merged;
    }

    /// Labels and counts in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LabelCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_feed_ads_and_ignores_extra_fields() {
        let body = r#"{
            "ads": [
                {"slug": "sony-bravia-55-for-sale-kandy", "timeStamp": "2 days", "price": "Rs 95,000"},
                {"slug": "lg-32-led-tv", "timeStamp": "bump_up"}
            ],
            "paginationData": {"activePage": 1}
        }"#;
        let parsed: FeedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.ads,
            vec![
                Listing::new("sony-bravia-55-for-sale-kandy", "2 days"),
                Listing::new("lg-32-led-tv", "bump_up"),
            ]
        );
    }

    #[test]
    fn increment_and_total() {
        let mut counts = LabelCounts::new();
        counts.increment("samsung");
        counts.increment("samsung");
        counts.increment("lg");
        assert_eq!(counts.get("samsung"), 2);
        assert_eq!(counts.get("lg"), 1);
        assert_eq!(counts.get("sony"), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn merge_labels_sums_variants_into_one_label() {
        let mut counts: LabelCounts = [
            ("apple_macbook", 2),
            ("apple_ipad", 3),
            ("apple_imac", 0),
            ("dell", 5),
        ]
        .into_iter()
        .collect();
        let variants = vec![
            "apple_macbook".to_string(),
            "apple_ipad".to_string(),
            "apple_imac".to_string(),
        ];
        counts.merge_labels("apple", &variants);

        let expected: LabelCounts = [("apple", 5), ("dell", 5)].into_iter().collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn merge_labels_writes_target_even_when_absent() {
        let mut counts: LabelCounts = [("hp", 4)].into_iter().collect();
        counts.merge_labels("apple", &["apple_ipad".to_string()]);
        assert_eq!(counts.get("apple"), 0);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("apple", 0), ("hp", 4)]);
    }

    #[test]
    fn merge_labels_adds_to_existing_target() {
        let mut counts: LabelCounts = [("apple", 1), ("apple_ipad", 2)].into_iter().collect();
        counts.merge_labels("apple", &["apple_ipad".to_string()]);
        assert_eq!(counts.get("apple"), 3);
        assert_eq!(counts.len(), 1);
    }
}
