//! Request parameters for the price-range rewrite
//!
//! The three relevant request parameters are modeled as an explicit struct
//! instead of a string-keyed property bag, validated once at the boundary.

use serde::{Deserialize, Serialize};

/// Raw request parameters, all optional strings as received on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewriteParams {
    /// Lower price bound, decimal string
    #[serde(rename = "min-price", default)]
    pub min_price: Option<String>,
    /// Upper price bound, decimal string
    #[serde(rename = "max-price", default)]
    pub max_price: Option<String>,
    /// Currency code the bounds are expressed in, case-insensitive
    #[serde(default)]
    pub currency: Option<String>,
}

/// A validated price-range request: both bounds parsed, currency uppercased
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    pub min_price: f64,
    pub max_price: f64,
    pub currency: String,
}

impl RewriteParams {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum price
    pub fn with_min_price(mut self, value: impl Into<String>) -> Self {
        self.min_price = Some(value.into());
        self
    }

    /// Set the maximum price
    pub fn with_max_price(mut self, value: impl Into<String>) -> Self {
        self.max_price = Some(value.into());
        self
    }

    /// Set the currency code
    pub fn with_currency(mut self, value: impl Into<String>) -> Self {
        self.currency = Some(value.into());
        self
    }

    /// Collect parameters from request-scoped key/value pairs.
    ///
    /// Recognizes `min-price`, `max-price` and `currency`; all other keys are
    /// ignored. Later pairs win over earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "min-price" => params.min_price = Some(value.into()),
                "max-price" => params.max_price = Some(value.into()),
                "currency" => params.currency = Some(value.into()),
                _ => {}
            }
        }
        params
    }

    /// Validate the parameters into a rewrite request.
    ///
    /// Returns `None` when the rewrite is not applicable: a parameter is
    /// missing, a bound does not parse as a finite number, or the bounds are
    /// inverted. Bounds are never swapped or clamped.
    pub fn request(&self) -> Option<RewriteRequest> {
        let min_str = self.min_price.as_deref()?;
        let max_str = self.max_price.as_deref()?;
        let currency = self.currency.as_deref()?;

        let min_price: f64 = min_str.trim().parse().ok()?;
        let max_price: f64 = max_str.trim().parse().ok()?;
        if !min_price.is_finite() || !max_price.is_finite() {
            return None;
        }
        if max_price < min_price {
            return None;
        }

        Some(RewriteRequest {
            min_price,
            max_price,
            currency: currency.to_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_valid_params() {
        let params = RewriteParams::new()
            .with_min_price("20")
            .with_max_price("80")
            .with_currency("usd");

        let request = params.request().unwrap();
        assert_eq!(request.min_price, 20.0);
        assert_eq!(request.max_price, 80.0);
        assert_eq!(request.currency, "USD");
    }

    #[test]
    fn test_request_missing_any_param_is_none() {
        let missing_min = RewriteParams::new().with_max_price("80").with_currency("usd");
        let missing_max = RewriteParams::new().with_min_price("20").with_currency("usd");
        let missing_currency = RewriteParams::new().with_min_price("20").with_max_price("80");

        assert!(missing_min.request().is_none());
        assert!(missing_max.request().is_none());
        assert!(missing_currency.request().is_none());
    }

    #[test]
    fn test_request_non_numeric_price_is_none() {
        let params = RewriteParams::new()
            .with_min_price("twenty")
            .with_max_price("80")
            .with_currency("usd");
        assert!(params.request().is_none());
    }

    #[test]
    fn test_request_non_finite_price_is_none() {
        let params = RewriteParams::new()
            .with_min_price("NaN")
            .with_max_price("inf")
            .with_currency("usd");
        assert!(params.request().is_none());
    }

    #[test]
    fn test_request_inverted_bounds_is_none() {
        let params = RewriteParams::new()
            .with_min_price("80")
            .with_max_price("20")
            .with_currency("usd");
        assert!(params.request().is_none());
    }

    #[test]
    fn test_request_equal_bounds_is_valid() {
        let params = RewriteParams::new()
            .with_min_price("50")
            .with_max_price("50")
            .with_currency("eur");

        let request = params.request().unwrap();
        assert_eq!(request.min_price, request.max_price);
    }

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let params = RewriteParams::from_pairs(vec![
            ("min-price", "20"),
            ("max-price", "80"),
            ("currency", "usd"),
            ("yql", "select * from sources item where true"),
        ]);

        assert_eq!(params.min_price.as_deref(), Some("20"));
        assert_eq!(params.max_price.as_deref(), Some("80"));
        assert_eq!(params.currency.as_deref(), Some("usd"));
    }

    #[test]
    fn test_params_deserialization_uses_wire_names() {
        let json = r#"{"min-price": "20", "max-price": "80", "currency": "usd"}"#;
        let params: RewriteParams = serde_json::from_str(json).unwrap();
        assert!(params.request().is_some());
    }
}
