//! Relevance filtering of aggregated search results

use super::heuristics::{is_result_relevant, looks_like_real_product};
use crate::types::SearchResult;
use tracing::debug;

/// Keeps results related to the idea, optionally only product pages
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    require_product_signals: bool,
}

impl RelevanceFilter {
    pub fn new(require_product_signals: bool) -> Self {
        Self {
            require_product_signals,
        }
    }

    pub fn is_kept(&self, idea: &str, result: &SearchResult) -> bool {
        is_result_relevant(idea, result)
            && (!self.require_product_signals || looks_like_real_product(result))
    }

    /// Results passing every active predicate, in input order
    pub fn filter(&self, idea: &str, results: Vec<SearchResult>) -> Vec<SearchResult> {
        let total = results.len();
        let kept: Vec<SearchResult> = results
            .into_iter()
            .filter(|r| self.is_kept(idea, r))
            .collect();
        debug!(total, kept = kept.len(), "Filtered search results for relevance");
        kept
    }
}
