use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub categories_path: PathBuf,
    pub report_dir: PathBuf,
    /// Listing feed endpoint, queried with sort/order/category/location/page.
    pub feed_url: String,
    /// Prefix for listing detail pages; the listing slug is appended as-is.
    pub detail_url: String,
    pub location_slug: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Politeness delay applied before every outbound request, retries included.
    pub scraper_inter_request_delay_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
}
