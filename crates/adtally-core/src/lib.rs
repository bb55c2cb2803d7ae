pub mod app_config;
pub mod categories;
pub mod config;
pub mod input;

use thiserror::Error;

pub use app_config::AppConfig;
pub use categories::{
    load_categories, parse_categories, CategoriesFile, CategoryConfig, FixedPattern, LabelMerge,
    LabelRule,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use input::{
    parse_day_count, parse_run_request, parse_target_date, InputError, RunRequest, MAX_DATE_AGE_DAYS,
    MAX_DAY_COUNT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid category configuration: {0}")]
    Validation(String),
}
