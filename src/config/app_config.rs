//! Application configuration module for multicur
//!
//! Provides TOML-based configuration with environment variable override
//! support. Priority: CLI args > Environment variables > Config file > Defaults

use super::RewriteConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the rates service; unset means the built-in tables
    #[serde(default)]
    rates_url: Option<String>,

    /// Path of the SQLite rate-snapshot cache; unset disables caching
    #[serde(default)]
    cache_path: Option<String>,

    /// Index field holding the normalized price (default: price)
    #[serde(default = "default_price_field")]
    price_field: String,

    /// Index field tagging the document currency (default: currency_idx)
    #[serde(default = "default_currency_idx_field")]
    currency_idx_field: String,
}

fn default_price_field() -> String {
    "price".to_string()
}

fn default_currency_idx_field() -> String {
    "currency_idx".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rates_url: None,
            cache_path: None,
            price_field: default_price_field(),
            currency_idx_field: default_currency_idx_field(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MULTICUR_RATES_URL") {
            config.rates_url = Some(url);
        }

        if let Ok(path) = std::env::var("MULTICUR_CACHE_PATH") {
            config.cache_path = Some(path);
        }

        if let Ok(field) = std::env::var("MULTICUR_PRICE_FIELD") {
            config.price_field = field;
        }

        if let Ok(field) = std::env::var("MULTICUR_CURRENCY_IDX_FIELD") {
            config.currency_idx_field = field;
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        Self {
            rates_url: other.rates_url.clone().or_else(|| self.rates_url.clone()),
            cache_path: other.cache_path.clone().or_else(|| self.cache_path.clone()),
            price_field: if other.price_field != default_price_field() {
                other.price_field.clone()
            } else {
                self.price_field.clone()
            },
            currency_idx_field: if other.currency_idx_field != default_currency_idx_field() {
                other.currency_idx_field.clone()
            } else {
                self.currency_idx_field.clone()
            },
        }
    }

    /// Override rates_url
    pub fn with_rates_url(mut self, url: &str) -> Self {
        self.rates_url = Some(url.to_string());
        self
    }

    /// Override cache_path
    pub fn with_cache_path(mut self, path: &str) -> Self {
        self.cache_path = Some(path.to_string());
        self
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    /// Rates service URL, if configured
    pub fn rates_url(&self) -> Option<&str> {
        self.rates_url.as_deref()
    }

    /// Cache path, if configured
    pub fn cache_path(&self) -> Option<&str> {
        self.cache_path.as_deref()
    }

    /// The rewriter configuration derived from the field names
    pub fn rewrite_config(&self) -> RewriteConfig {
        RewriteConfig::new()
            .with_price_field(&self.price_field)
            .with_currency_idx_field(&self.currency_idx_field)
    }
}
