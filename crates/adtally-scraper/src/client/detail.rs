//! Attribute extraction from listing detail pages.
//!
//! Detail pages render listing attributes (condition, brand, model, ...) as a
//! definition list. Only the `<dd>` values are kept, in document order; the
//! resolver picks one by position.

use scraper::{Html, Selector};

/// Returns the trimmed text of every `<dd>` element in `html`, in document order.
#[must_use]
pub fn extract_attribute_values(html: &str) -> Vec<String> {
    let selector = Selector::parse("dd").expect("valid dd selector");
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .map(|dd| dd.text().collect::<String>().trim().to_owned())
        .collect()
}
