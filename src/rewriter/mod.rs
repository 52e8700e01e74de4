//! Query rewriter module
//!
//! Currency-aware price-range rewriting of the query's filter tree.

mod price_rewriter;

pub use price_rewriter::PriceRewriter;
