//! Exchange-rate and currency-index lookups
//!
//! The rewriter never sources rate data itself; it consumes immutable
//! per-request snapshots from a [`RateSource`] collaborator. Two
//! implementations are provided: an in-memory table set and an HTTP client
//! for a rates service, optionally backed by a SQLite cache.

mod cache;
mod service;
mod static_source;

use anyhow::Result;
use std::collections::HashMap;

pub use cache::RateCache;
pub use service::{RatesClient, RatesServiceError};
pub use static_source::StaticRates;

/// Conversion factors from one source currency: target code -> factor.
/// "1 unit of source currency = factor units of target currency."
pub type RateTable = HashMap<String, f64>;

/// Currency code -> integer index used to tag documents in the backing index
pub type IndexTable = HashMap<String, u32>;

/// External provider of rate and currency-index snapshots.
///
/// An empty table is the in-band signal for "unknown source currency" or
/// "index unavailable"; callers treat a returned error the same way.
pub trait RateSource {
    /// Conversion factors from the given source currency to every
    /// convertible target, including the identity entry for the source
    fn fetch_rates(&self, source_currency: &str) -> Result<RateTable>;

    /// The global currency -> index mapping of the backing index
    fn fetch_currency_index(&self) -> Result<IndexTable>;
}
