//! Rewrite configuration
//!
//! Names of the index fields the generated filter clause targets.

use serde::{Deserialize, Serialize};

/// Configuration for the price-range rewriter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Field holding the normalized integer price
    pub price_field: String,
    /// Field tagging a document with its currency index
    pub currency_idx_field: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            price_field: "price".to_string(),
            currency_idx_field: "currency_idx".to_string(),
        }
    }
}

impl RewriteConfig {
    /// Create a configuration with default field names
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price field name
    pub fn with_price_field(mut self, field: impl Into<String>) -> Self {
        self.price_field = field.into();
        self
    }

    /// Set the currency-index field name
    pub fn with_currency_idx_field(mut self, field: impl Into<String>) -> Self {
        self.currency_idx_field = field.into();
        self
    }
}
