//! Label assignment for counted listings.
//!
//! Labels come from the listing slug wherever possible. Only brand-mode
//! categories ever touch the network, and only when no known brand token
//! appears in the slug.

use adtally_core::{CategoryConfig, LabelRule};
use regex::{Regex, RegexBuilder};

use crate::error::ScraperError;
use crate::source::ListingSource;

/// Bucket for brand-mode listings whose detail page names no brand.
pub const UNKNOWN_BRAND_LABEL: &str = "other_brand";

/// Outcome of matching a slug against a category's label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatch {
    Label(String),
    /// No brand token matched; read the attribute at this 1-based position
    /// on the detail page.
    NeedsDetail { position: usize },
    /// Fixed-mode listing that matches no sub-category; not counted.
    Excluded,
}

#[derive(Debug)]
enum Table {
    Brand {
        tokens: Regex,
        detail_position: usize,
    },
    Fixed(Vec<(String, Regex)>),
    Unfiltered(String),
}

/// Compiled label table for one category.
#[derive(Debug)]
pub struct LabelResolver {
    table: Table,
}

impl LabelResolver {
    /// Compiles the category's label rule.
    ///
    /// Brand tokens are matched literally; fixed-mode patterns are regular
    /// expressions. Both match case-insensitively anywhere in the slug.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if a pattern does not compile.
    pub fn from_category(category: &CategoryConfig) -> Result<Self, ScraperError> {
        let compile = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ScraperError::InvalidPattern {
                    category: category.slug.clone(),
                    source,
                })
        };

        let table = match &category.labels {
            LabelRule::Brand {
                brands,
                detail_position,
            } => {
                let alternation = brands
                    .iter()
                    .map(|b| b.trim())
                    .filter(|b| !b.is_empty())
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join("|");
                Table::Brand {
                    tokens: compile(&alternation)?,
                    detail_position: *detail_position,
                }
            }
            LabelRule::Fixed { patterns } => Table::Fixed(
                patterns
                    .iter()
                    .map(|p| Ok((p.label.clone(), compile(&p.pattern)?)))
                    .collect::<Result<Vec<_>, ScraperError>>()?,
            ),
            LabelRule::Unfiltered { label } => Table::Unfiltered(label.clone()),
        };

        Ok(Self { table })
    }

    /// Matches a listing slug without any I/O.
    ///
    /// In brand mode the leftmost token occurrence wins; when two tokens
    /// match at the same position the one listed first wins. In fixed mode
    /// the first pattern in table order that matches anywhere wins.
    #[must_use]
    pub fn match_identifier(&self, identifier: &str) -> LabelMatch {
        match &self.table {
            Table::Brand {
                tokens,
                detail_position,
            } => tokens.find(identifier).map_or(
                LabelMatch::NeedsDetail {
                    position: *detail_position,
                },
                |m| LabelMatch::Label(m.as_str().to_lowercase()),
            ),
            Table::Fixed(patterns) => patterns
                .iter()
                .find(|(_, re)| re.is_match(identifier))
                .map_or(LabelMatch::Excluded, |(label, _)| {
                    LabelMatch::Label(label.clone())
                }),
            Table::Unfiltered(label) => LabelMatch::Label(label.clone()),
        }
    }

    /// Resolves the label for a counted listing, falling back to its detail
    /// page in brand mode. `None` means the listing is not counted.
    ///
    /// # Errors
    ///
    /// Propagates detail page fetch failures from `source`.
    pub async fn resolve<S: ListingSource>(
        &self,
        source: &S,
        identifier: &str,
    ) -> Result<Option<String>, ScraperError> {
        match self.match_identifier(identifier) {
            LabelMatch::Label(label) => Ok(Some(label)),
            LabelMatch::Excluded => Ok(None),
            LabelMatch::NeedsDetail { position } => {
                let attributes = source.fetch_detail_attributes(identifier).await?;
                let label = label_from_attributes(&attributes, position);
                tracing::debug!(identifier, label = %label, "brand resolved from detail page");
                Ok(Some(label))
            }
        }
    }
}

/// Picks the 1-based `position` attribute as a label, or the unknown bucket
/// when the page has no such attribute.
#[must_use]
pub fn label_from_attributes(attributes: &[String], position: usize) -> String {
    position
        .checked_sub(1)
        .and_then(|idx| attributes.get(idx))
        .map(|raw| normalize_label(raw))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| UNKNOWN_BRAND_LABEL.to_owned())
}

/// Lowercases and replaces spaces with underscores: `"Apple MacBook"` → `"apple_macbook"`.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
