use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a runnable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let log_level = or_default("ADTALLY_LOG_LEVEL", "info");
    let categories_path = PathBuf::from(or_default(
        "ADTALLY_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let report_dir = PathBuf::from(or_default("ADTALLY_REPORT_DIR", "."));

    let feed_url = non_empty("ADTALLY_FEED_URL", "https://ikman.lk/data/serp")?;
    let detail_url = non_empty("ADTALLY_DETAIL_URL", "https://ikman.lk/en/ad/")?;
    let location_slug = non_empty("ADTALLY_LOCATION_SLUG", "sri-lanka")?;

    let scraper_request_timeout_secs = parse_u64("ADTALLY_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "ADTALLY_SCRAPER_USER_AGENT",
        "adtally/0.1 (listing-counts)",
    );
    let scraper_inter_request_delay_ms =
        parse_u64("ADTALLY_SCRAPER_INTER_REQUEST_DELAY_MS", "500")?;
    let scraper_max_retries = parse_u32("ADTALLY_SCRAPER_MAX_RETRIES", "10")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("ADTALLY_SCRAPER_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        log_level,
        categories_path,
        report_dir,
        feed_url,
        detail_url,
        location_slug,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
