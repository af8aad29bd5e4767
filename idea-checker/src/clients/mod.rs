//! External collaborator interfaces
//!
//! The pipeline only talks to the outside world through these two traits.
//! Implementations are injected as `Arc<dyn …>` so tests can substitute fakes.

pub mod brave_search;
pub mod gemini;

pub use brave_search::BraveSearchClient;
pub use gemini::GeminiClient;

use crate::types::SearchResult;
use async_trait::async_trait;
use thiserror::Error;

/// Web search failures
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Text generation failures
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Unparsable model output: {0}")]
    Parse(String),
}

/// Web search collaborator
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    /// Run one query, returning at most `count` results in ranking order
    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>, SearchError>;
}

/// Generative text collaborator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier for logs
    fn model(&self) -> &str;

    /// Send one prompt and return the raw text reply
    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError>;
}
