//! Search pipeline
//!
//! The downstream interface the rewriter sits in front of: a backend that
//! executes a filter tree and returns hits, and a pipeline that applies the
//! rewrite before forwarding each query.

use crate::query::{QueryTree, RewriteParams};
use crate::rates::RateSource;
use crate::rewriter::PriceRewriter;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One result document from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Document identifier
    pub id: String,
    /// Stored fields, as returned by the backend
    pub fields: serde_json::Value,
}

/// The execution engine downstream of the rewriter.
///
/// The rewriter is strictly upstream of this entry point and never inspects
/// the result set.
pub trait SearchBackend {
    /// Execute a filter tree and return matching hits
    fn execute(&self, query: &QueryTree) -> Result<Vec<Hit>>;
}

/// Request pipeline: rewrite the query, then hand it to the backend
pub struct SearchPipeline {
    rewriter: PriceRewriter,
    source: Box<dyn RateSource>,
    backend: Box<dyn SearchBackend>,
}

impl SearchPipeline {
    /// Create a pipeline from a rewriter, a rate source and a backend
    pub fn new(
        rewriter: PriceRewriter,
        source: Box<dyn RateSource>,
        backend: Box<dyn SearchBackend>,
    ) -> Self {
        Self {
            rewriter,
            source,
            backend,
        }
    }

    /// Run one query through rewrite and execution
    pub fn search(&self, query: QueryTree, params: &RewriteParams) -> Result<Vec<Hit>> {
        let rewritten = self.rewriter.rewrite(query, params, self.source.as_ref());
        self.backend.execute(&rewritten)
    }
}
