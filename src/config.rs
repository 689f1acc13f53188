//! Deployment configuration for the `sharp-url` CLI.
//!
//! A single `sharp.toml` describes one Serverless Image Handler deployment:
//!
//! ```toml
//! # Distribution base URL. Supports $VAR environment placeholders.
//! base_url = "https://images.example.com"
//!
//! # Source bucket, for bucket-backed assets. Omit for local/web volumes.
//! # Supports $VAR placeholders, e.g. "$S3_IMAGES_BUCKET".
//! bucket = "my-site-images"
//!
//! # Request a sharpen edit when the output is scaled past the threshold.
//! auto_sharpen_scaled_images = false
//! sharpen_scaled_image_percentage = 50
//! ```
//!
//! Placeholders are resolved at load time via [`env::parse_env`](crate::env::parse_env);
//! everything downstream of [`Config::load`] sees concrete strings.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::env;
use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML in config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Distribution base URL (environment-resolved on load).
    pub base_url: String,
    /// Source bucket for bucket-backed assets (environment-resolved on load).
    pub bucket: Option<String>,
    pub auto_sharpen_scaled_images: bool,
    pub sharpen_scaled_image_percentage: u32,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            base_url: String::new(),
            bucket: None,
            auto_sharpen_scaled_images: settings.auto_sharpen_scaled_images,
            sharpen_scaled_image_percentage: settings.sharpen_scaled_image_percentage,
        }
    }
}

impl Config {
    /// Load, env-resolve, and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.base_url = env::parse_env(&config.base_url);
        config.bucket = config.bucket.as_deref().map(env::parse_env);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url must be set to the distribution URL".to_string(),
            ));
        }
        Ok(())
    }

    /// The builder settings carried by this config.
    pub fn settings(&self) -> Settings {
        Settings {
            auto_sharpen_scaled_images: self.auto_sharpen_scaled_images,
            sharpen_scaled_image_percentage: self.sharpen_scaled_image_percentage,
        }
    }
}

/// A documented stock config, for `sharp-url gen-config`.
pub fn stock_config_toml() -> String {
    "\
# sharp-url configuration
#
# One file per Serverless Image Handler deployment.

# Distribution base URL. Supports $VAR environment placeholders.
base_url = \"https://images.example.com\"

# Source bucket, for bucket-backed assets. Omit for local/web volumes.
# Supports $VAR placeholders, e.g. \"$S3_IMAGES_BUCKET\".
#bucket = \"my-site-images\"

# Request a sharpen edit when the output is scaled past the threshold
# percentage (round(100 * target / original), per axis).
auto_sharpen_scaled_images = false
sharpen_scaled_image_percentage = 50
"
    .to_string()
}
