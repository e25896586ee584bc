//! Shared data model and configuration for the VoB–VoC insight engine.
//!
//! Holds the review record, the sentiment and gap taxonomies with their
//! fixed lookup tables, the product promise catalog, and application config.

pub mod app_config;
pub mod config;
pub mod labels;
pub mod products;
pub mod review;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use labels::{action_for, action_for_label, localized_label, NO_INFO_LABEL};
pub use products::{load_products, parse_products, ProductPromise, ProductsFile};
pub use review::{GapType, Review, Sentiment, DEFAULT_PRODUCT_NAME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read products file {path}: {source}")]
    ProductsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse products file: {0}")]
    ProductsFileParse(#[from] serde_yaml::Error),

    #[error("products validation failed: {0}")]
    Validation(String),
}
