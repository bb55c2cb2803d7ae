//! In-memory [`ListingSource`] for scanner and resolver tests.

use std::cell::RefCell;
use std::collections::HashMap;

use adtally_core::{CategoryConfig, LabelRule};

use crate::error::ScraperError;
use crate::source::ListingSource;
use crate::types::Listing;

#[derive(Default)]
pub(crate) struct FakeSource {
    /// Pages per category slug; page `n` is `pages[n - 1]`, anything past
    /// the end is empty.
    pages: HashMap<String, Vec<Vec<Listing>>>,
    details: HashMap<String, Vec<String>>,
    pub page_requests: RefCell<Vec<(String, u32)>>,
    pub detail_requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_pages(mut self, slug: &str, pages: Vec<Vec<Listing>>) -> Self {
        self.pages.insert(slug.to_owned(), pages);
        self
    }

    pub fn with_detail(mut self, identifier: &str, attributes: &[&str]) -> Self {
        self.details.insert(
            identifier.to_owned(),
            attributes.iter().map(|a| (*a).to_owned()).collect(),
        );
        self
    }
}

impl ListingSource for FakeSource {
    async fn fetch_page(
        &self,
        category: &CategoryConfig,
        page: u32,
    ) -> Result<Vec<Listing>, ScraperError> {
        self.page_requests
            .borrow_mut()
            .push((category.slug.clone(), page));
        let idx = usize::try_from(page).unwrap() - 1;
        Ok(self
            .pages
            .get(&category.slug)
            .and_then(|pages| pages.get(idx))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_detail_attributes(&self, identifier: &str) -> Result<Vec<String>, ScraperError> {
        self.detail_requests.borrow_mut().push(identifier.to_owned());
        Ok(self.details.get(identifier).cloned().unwrap_or_default())
    }
}

pub(crate) fn listing(identifier: &str, timestamp: &str) -> Listing {
    Listing::new(identifier, timestamp)
}

pub(crate) fn brand_category(slug: &str, brands: &[&str], detail_position: usize) -> CategoryConfig {
    CategoryConfig {
        slug: slug.to_owned(),
        category_code: None,
        labels: LabelRule::Brand {
            brands: brands.iter().map(|b| (*b).to_owned()).collect(),
            detail_position,
        },
        merge: vec![],
    }
}

pub(crate) fn unfiltered_category(slug: &str) -> CategoryConfig {
    CategoryConfig {
        slug: slug.to_owned(),
        category_code: None,
        labels: LabelRule::Unfiltered {
            label: "no_brand".to_owned(),
        },
        merge: vec![],
    }
}
