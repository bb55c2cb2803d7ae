use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One feed category to count, and how its listings are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Feed category slug, e.g. `"mobile-phones"`.
    pub slug: String,
    /// Numeric category code sent alongside the slug when the feed needs it.
    #[serde(default)]
    pub category_code: Option<u32>,
    pub labels: LabelRule,
    /// Label merges applied to this category's counts before reporting.
    #[serde(default)]
    pub merge: Vec<LabelMerge>,
}

/// How a counted listing is assigned its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LabelRule {
    /// Match the listing slug against known brand tokens; fall back to the
    /// `detail_position`-th (1-based) attribute on the listing's detail page.
    Brand {
        brands: Vec<String>,
        detail_position: usize,
    },
    /// Match the listing slug against an ordered table of sub-category
    /// patterns. Unmatched listings are not counted.
    Fixed { patterns: Vec<FixedPattern> },
    /// Every counted listing gets the same label.
    Unfiltered { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPattern {
    pub label: String,
    /// Regular expression searched for anywhere in the listing slug.
    pub pattern: String,
}

/// Folds several labels into one, summing their counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMerge {
    pub into: String,
    pub from: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

/// Load and validate the category definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_categories(&content)
}

/// Parse and validate category definitions from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_categories(content: &str) -> Result<CategoriesFile, ConfigError> {
    let categories_file: CategoriesFile = serde_yaml::from_str(content)?;
    validate_categories(&categories_file)?;
    Ok(categories_file)
}

fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    if categories_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    let mut seen_slugs = HashSet::new();

    for category in &categories_file.categories {
        let slug = category.slug.trim();
        if slug.is_empty() {
            return Err(ConfigError::Validation(
                "category slug must be non-empty".to_string(),
            ));
        }

        if !seen_slugs.insert(slug.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{slug}'"
            )));
        }

        validate_label_rule(slug, &category.labels)?;

        for merge in &category.merge {
            if merge.into.trim().is_empty() || merge.from.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' has a merge with an empty target or source list"
                )));
            }
        }
    }

    Ok(())
}

fn validate_label_rule(slug: &str, rule: &LabelRule) -> Result<(), ConfigError> {
    match rule {
        LabelRule::Brand {
            brands,
            detail_position,
        } => {
            if brands.iter().all(|b| b.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' uses brand mode but lists no brands"
                )));
            }
            if *detail_position == 0 {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' has detail_position 0; positions are 1-based"
                )));
            }
        }
        LabelRule::Fixed { patterns } => {
            if patterns.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' uses fixed mode but lists no patterns"
                )));
            }
            if let Some(p) = patterns
                .iter()
                .find(|p| p.label.trim().is_empty() || p.pattern.is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' has an incomplete fixed pattern (label '{}', pattern '{}')",
                    p.label, p.pattern
                )));
            }
        }
        LabelRule::Unfiltered { label } => {
            if label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{slug}' uses unfiltered mode with an empty label"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
