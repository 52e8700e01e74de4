//! Query model
//!
//! Filter tree and request parameters for the price-range rewrite.

mod params;
mod tree;

pub use params::{RewriteParams, RewriteRequest};
pub use tree::{FilterNode, QueryTree};
