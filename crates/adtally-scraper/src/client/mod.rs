//! HTTP client for the listing feed and listing detail pages.

mod detail;

use std::time::Duration;

use adtally_core::{AppConfig, CategoryConfig};
use reqwest::Client;

use crate::error::ScraperError;
use crate::rate_limit::{retry_with_backoff, RetryPolicy};
use crate::source::ListingSource;
use crate::types::{FeedResponse, Listing};

pub use detail::extract_attribute_values;

/// Where the feed and detail pages live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoints {
    /// Feed endpoint, e.g. `https://ikman.lk/data/serp`.
    pub feed_url: String,
    /// Detail page prefix; the listing slug is appended verbatim.
    pub detail_url: String,
    pub location_slug: String,
}

/// HTTP client for the recency-sorted listing feed.
///
/// Every request waits the policy's politeness delay first. Non-success
/// statuses surface as [`ScraperError::TransientStatus`] and, together with
/// timeouts and connection failures, are retried with exponential backoff.
pub struct ListingClient {
    client: Client,
    endpoints: FeedEndpoints,
    policy: RetryPolicy,
}

impl ListingClient {
    /// Creates a `ListingClient` with configured timeout, `User-Agent`, and
    /// request pacing.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        endpoints: FeedEndpoints,
        policy: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints,
            policy,
        })
    }

    /// Builds a client from the `ADTALLY_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            FeedEndpoints {
                feed_url: config.feed_url.clone(),
                detail_url: config.detail_url.clone(),
                location_slug: config.location_slug.clone(),
            },
            RetryPolicy {
                inter_request_delay: Duration::from_millis(config.scraper_inter_request_delay_ms),
                max_retries: config.scraper_max_retries,
                backoff_base_secs: config.scraper_retry_backoff_base_secs,
            },
        )
    }

    /// Fetches one page of the feed for `category`, newest listings first.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::TransientStatus`]: non-2xx status after all retries.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries.
    /// - [`ScraperError::Deserialize`]: body is not a feed response (not retried).
    /// - [`ScraperError::InvalidUrl`]: the configured feed URL is unusable.
    pub async fn fetch_listings_page(
        &self,
        category: &CategoryConfig,
        page: u32,
    ) -> Result<Vec<Listing>, ScraperError> {
        let url = self.feed_page_url(category, page)?;

        retry_with_backoff(self.policy, || {
            let url = url.clone();
            async move {
                let body = self.get_text(&url, "application/json").await?;
                let parsed = serde_json::from_str::<FeedResponse>(&body).map_err(|e| {
                    ScraperError::Deserialize {
                        context: format!("feed page {page} of {}", category.slug),
                        source: e,
                    }
                })?;
                Ok(parsed.ads)
            }
        })
        .await
    }

    /// Fetches a listing's detail page and extracts its attribute values.
    ///
    /// # Errors
    ///
    /// Same retry and error behaviour as [`Self::fetch_listings_page`].
    pub async fn fetch_listing_attributes(
        &self,
        identifier: &str,
    ) -> Result<Vec<String>, ScraperError> {
        let url = self.detail_page_url(identifier)?;

        retry_with_backoff(self.policy, || {
            let url = url.clone();
            async move {
                let html = self.get_text(&url, "text/html").await?;
                Ok(extract_attribute_values(&html))
            }
        })
        .await
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::TransientStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Builds the feed URL for one page of `category`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the feed URL does not parse.
    fn feed_page_url(&self, category: &CategoryConfig, page: u32) -> Result<String, ScraperError> {
        let mut url = reqwest::Url::parse(&self.endpoints.feed_url).map_err(|e| {
            ScraperError::InvalidUrl {
                url: self.endpoints.feed_url.clone(),
                reason: e.to_string(),
            }
        })?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("sort", "date")
                .append_pair("order", "desc")
                .append_pair("categorySlug", &category.slug)
                .append_pair("locationSlug", &self.endpoints.location_slug)
                .append_pair("page", &page.to_string());
            if let Some(code) = category.category_code {
                query.append_pair("categoryCode", &code.to_string());
            }
        }

        Ok(url.to_string())
    }

    /// Builds the detail page URL for a listing slug.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the result does not parse.
    fn detail_page_url(&self, identifier: &str) -> Result<String, ScraperError> {
        let raw = format!("{}{identifier}", self.endpoints.detail_url);
        reqwest::Url::parse(&raw)
            .map(String::from)
            .map_err(|e| ScraperError::InvalidUrl {
                url: raw,
                reason: e.to_string(),
            })
    }
}

impl ListingSource for ListingClient {
    async fn fetch_page(
        &self,
        category: &CategoryConfig,
        page: u32,
    ) -> Result<Vec<Listing>, ScraperError> {
        self.fetch_listings_page(category, page).await
    }

    async fn fetch_detail_attributes(&self, identifier: &str) -> Result<Vec<String>, ScraperError> {
        self.fetch_listing_attributes(identifier).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
