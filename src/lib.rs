//! multicur: currency-aware price-range query rewriting
//!
//! This library rewrites a search query's boolean filter tree so an index
//! that stores prices in a single normalized unit space, tagged by a
//! currency index, can be searched with a price range expressed in any
//! convertible currency. The user's range is converted through the source
//! currency's rate table and grafted onto the existing tree as a disjunction
//! of per-currency clauses; the original tree is never mutated.
//!
//! All malformed-input and missing-data paths resolve to pass-through: the
//! query is forwarded unmodified and no error reaches the caller.
//!
//! # Modules
//!
//! - `config`: application configuration and rewriter field names
//! - `query`: filter tree and request parameters
//! - `rates`: exchange-rate and currency-index lookups
//! - `rewriter`: the price-range rewrite itself
//! - `search`: downstream backend interface and request pipeline
//! - `feed`: rate-snapshot to currency-document conversion

pub mod config;
pub mod feed;
pub mod query;
pub mod rates;
pub mod rewriter;
pub mod search;

// Re-export commonly used types
pub use config::RewriteConfig;
pub use query::{FilterNode, QueryTree, RewriteParams};
pub use rates::{RateSource, StaticRates};
pub use rewriter::PriceRewriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
