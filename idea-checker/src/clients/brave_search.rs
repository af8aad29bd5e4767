//! Brave Search API client
//!
//! Web search with client-side rate limiting (the free Brave tier allows one
//! request per second).

use super::{SearchError, SearchProvider};
use crate::types::SearchResult;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use idea_common::config::MAX_RESULTS_PER_QUERY;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

const BRAVE_SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";

#[derive(Debug, Deserialize)]
struct BraveResponse {
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveWebResult>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

/// Brave Search API client
pub struct BraveSearchClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    rate_limiter: DefaultDirectRateLimiter,
}

impl BraveSearchClient {
    pub fn new(api_key: Option<String>, requests_per_second: u32) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http_client,
            api_key,
            base_url: BRAVE_SEARCH_URL.to_string(),
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    /// Point the client at another endpoint (local mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveSearchClient {
    fn name(&self) -> &'static str {
        "brave"
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;
        let count = count.min(MAX_RESULTS_PER_QUERY);

        self.rate_limiter.until_ready().await;

        debug!(query = %query, count, "Querying Brave Search");

        let response = self
            .http_client
            .get(&self.base_url)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key)
            .query(&[("q", query.to_string()), ("count", count.to_string())])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(status.as_u16(), error_text));
        }

        let body: BraveResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(into_results(body))
    }
}

fn into_results(body: BraveResponse) -> Vec<SearchResult> {
    body.web
        .map(|web| {
            web.results
                .into_iter()
                .map(|r| SearchResult::new(r.title, r.description, r.url))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_results_with_missing_fields() {
        let body: BraveResponse = serde_json::from_str(
            r#"{
                "web": {
                    "results": [
                        {"title": "PlantCare", "description": "Watering app", "url": "https://plantcare.example"},
                        {"title": "No description", "url": "https://nodesc.example"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let results = into_results(body);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "PlantCare");
        assert_eq!(results[1].description, "");
    }

    #[test]
    fn test_parse_response_without_web_section() {
        let body: BraveResponse = serde_json::from_str(r#"{"query": {"original": "x"}}"#).unwrap();
        assert!(into_results(body).is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = BraveSearchClient::new(None, 1).unwrap();
        let result = client.search("anything", 10).await;
        assert!(matches!(result, Err(SearchError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = BraveSearchClient::new(Some("key".to_string()), 10)
            .unwrap()
            .with_base_url("http://127.0.0.1:9/search");
        let result = client.search("anything", 10).await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }
}
