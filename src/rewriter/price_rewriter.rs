//! Price-range rewriter implementation
//!
//! Converts a user's price range through the source currency's rate table
//! and grafts the resulting disjunctive filter onto the query tree.

use crate::config::RewriteConfig;
use crate::query::{FilterNode, QueryTree, RewriteParams};
use crate::rates::RateSource;

/// Currency-aware price-range rewriter.
///
/// Every anomaly in the request parameters or in collaborator data resolves
/// to pass-through: the input tree is returned unmodified and nothing is
/// reported to the caller. The only observable outcomes are "tree changed"
/// and "tree unchanged".
#[derive(Debug, Clone, Default)]
pub struct PriceRewriter {
    config: RewriteConfig,
}

impl PriceRewriter {
    /// Create a rewriter with default field names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rewriter with custom field names
    pub fn with_config(config: RewriteConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite the query's filter tree for a currency-converted price range.
    ///
    /// Builds one disjunct per target currency the source currency converts
    /// to: an AND of an exact `currency_idx` match and the converted price
    /// range, rounded outward with floor/ceil so the integer-bucketed range
    /// never excludes a boundary value. The OR of all disjuncts is conjoined
    /// with the existing root; the original subtree is reused unmodified.
    pub fn rewrite(
        &self,
        query: QueryTree,
        params: &RewriteParams,
        source: &dyn RateSource,
    ) -> QueryTree {
        let request = match params.request() {
            Some(request) => request,
            None => return query,
        };

        let rates = source.fetch_rates(&request.currency).unwrap_or_else(|e| {
            tracing::warn!("rate lookup for {} failed: {}", request.currency, e);
            Default::default()
        });
        if rates.is_empty() {
            tracing::debug!("no rates for {}, passing query through", request.currency);
            return query;
        }

        let index = source.fetch_currency_index().unwrap_or_else(|e| {
            tracing::warn!("currency index lookup failed: {}", e);
            Default::default()
        });
        if index.is_empty() {
            tracing::debug!("currency index unavailable, passing query through");
            return query;
        }

        let mut disjuncts = Vec::with_capacity(rates.len());
        for (target, rate) in &rates {
            let target = target.to_uppercase();
            let idx = match index.get(&target) {
                Some(&idx) => idx,
                None => {
                    tracing::debug!("no index entry for {}, dropping disjunct", target);
                    continue;
                }
            };

            let low = (request.min_price * rate).floor() as i64;
            let high = (request.max_price * rate).ceil() as i64;

            disjuncts.push(FilterNode::and(vec![
                FilterNode::range(&self.config.currency_idx_field, i64::from(idx), i64::from(idx)),
                FilterNode::range(&self.config.price_field, low, high),
            ]));
        }

        if disjuncts.is_empty() {
            return query;
        }

        query.and_with(FilterNode::or(disjuncts))
    }
}
