//! In-memory rate source
//!
//! Explicit tables for tests and offline use, plus the built-in sample set
//! covering USD, EUR and NOK.

use super::{IndexTable, RateSource, RateTable};
use anyhow::Result;
use std::collections::HashMap;

/// Rate source backed by in-memory tables
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    rates: HashMap<String, RateTable>,
    index: IndexTable,
}

impl StaticRates {
    /// Create a source from explicit per-currency rate tables and an index table
    pub fn new(rates: HashMap<String, RateTable>, index: IndexTable) -> Self {
        Self { rates, index }
    }

    /// A source that knows no currencies at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in sample set: USD, EUR and NOK with fixed cross rates
    pub fn builtin() -> Self {
        let mut rates = HashMap::new();
        rates.insert(
            "USD".to_string(),
            HashMap::from([
                ("EUR".to_string(), 0.89879561),
                ("NOK".to_string(), 10.61571125),
                ("USD".to_string(), 1.0),
            ]),
        );
        rates.insert(
            "EUR".to_string(),
            HashMap::from([
                ("USD".to_string(), 1.21521449),
                ("NOK".to_string(), 12.33045623),
                ("EUR".to_string(), 1.0),
            ]),
        );
        rates.insert(
            "NOK".to_string(),
            HashMap::from([
                ("USD".to_string(), 0.10324712),
                ("EUR".to_string(), 0.08890074),
                ("NOK".to_string(), 1.0),
            ]),
        );

        let index = HashMap::from([
            ("USD".to_string(), 27),
            ("EUR".to_string(), 7),
            ("NOK".to_string(), 18),
        ]);

        Self { rates, index }
    }
}

impl RateSource for StaticRates {
    fn fetch_rates(&self, source_currency: &str) -> Result<RateTable> {
        Ok(self
            .rates
            .get(&source_currency.to_uppercase())
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_currency_index(&self) -> Result<IndexTable> {
        Ok(self.index.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_knows_usd() {
        let source = StaticRates::builtin();
        let rates = source.fetch_rates("USD").unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.get("USD"), Some(&1.0));
    }

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let source = StaticRates::builtin();
        let rates = source.fetch_rates("usd").unwrap();
        assert_eq!(rates.len(), 3);
    }

    #[test]
    fn test_unknown_currency_returns_empty_table() {
        let source = StaticRates::builtin();
        let rates = source.fetch_rates("GBP").unwrap();
        assert!(rates.is_empty());
    }

    #[test]
    fn test_empty_source_has_no_index() {
        let source = StaticRates::empty();
        assert!(source.fetch_currency_index().unwrap().is_empty());
    }

    #[test]
    fn test_builtin_index_entries() {
        let source = StaticRates::builtin();
        let index = source.fetch_currency_index().unwrap();
        assert_eq!(index.get("USD"), Some(&27));
        assert_eq!(index.get("EUR"), Some(&7));
        assert_eq!(index.get("NOK"), Some(&18));
    }
}
