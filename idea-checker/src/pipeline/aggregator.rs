//! Search result aggregation
//!
//! Runs the planned queries, merges results in query order then rank order,
//! drops duplicate URLs (first occurrence wins) and filters out app stores,
//! news/review outlets and listicle-style paths.

use super::fallback;
use crate::clients::SearchProvider;
use crate::types::SearchResult;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Domains whose pages are never treated as competitor products
const EXCLUDED_DOMAINS: &[&str] = &[
    "apps.apple.com",
    "play.google.com",
    "microsoft.com/store",
    "techcrunch.com",
    "forbes.com",
    "nytimes.com",
    "theverge.com",
    "wired.com",
    "cnet.com",
    "businessinsider.com",
    "medium.com",
    "reddit.com",
    "quora.com",
    "wikipedia.org",
    "youtube.com",
    "producthunt.com",
    "g2.com",
    "capterra.com",
    "trustpilot.com",
];

/// URL path fragments of articles and listicles
const EXCLUDED_URL_KEYWORDS: &[&str] = &[
    "/blog/", "/news/", "/top-", "/best-", "/article", "/review", "/list-", "/guide",
];

/// True when the URL points at an excluded domain or article-style path
pub fn is_excluded_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    EXCLUDED_DOMAINS
        .iter()
        .chain(EXCLUDED_URL_KEYWORDS.iter())
        .any(|fragment| lower.contains(fragment))
}

/// Flatten per-query batches in order, dedupe by exact URL, drop excluded URLs
pub fn merge_results(batches: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut seen_urls = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|result| seen_urls.insert(result.url.clone()))
        .filter(|result| !is_excluded_url(&result.url))
        .collect()
}

/// Executes planned queries against the search collaborator
pub struct ResultAggregator {
    search: Arc<dyn SearchProvider>,
    max_queries: usize,
    results_per_query: u32,
    concurrency: usize,
}

impl ResultAggregator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        max_queries: usize,
        results_per_query: u32,
        concurrency: usize,
    ) -> Self {
        Self {
            search,
            max_queries: max_queries.max(1),
            results_per_query,
            concurrency: concurrency.max(1),
        }
    }

    /// Run up to `max_queries` queries and merge their results
    pub async fn aggregate(&self, queries: &[String]) -> Vec<SearchResult> {
        let planned = &queries[..queries.len().min(self.max_queries)];

        // `buffered` yields in input order, so the merge order stays the
        // query-list order at any concurrency
        let searches: Vec<_> = planned.iter().map(|query| self.search_one(query)).collect();
        let batches: Vec<Vec<SearchResult>> = stream::iter(searches)
            .buffered(self.concurrency)
            .collect()
            .await;

        let raw_count: usize = batches.iter().map(Vec::len).sum();
        let merged = merge_results(batches);
        debug!(
            queries = planned.len(),
            raw = raw_count,
            kept = merged.len(),
            "Aggregated search results"
        );
        merged
    }

    async fn search_one(&self, query: &str) -> Vec<SearchResult> {
        match self.search.search(query, self.results_per_query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    provider = self.search.name(),
                    query = %query,
                    "Search failed, skipping query: {}",
                    e
                );
                fallback::search_results()
            }
        }
    }
}
