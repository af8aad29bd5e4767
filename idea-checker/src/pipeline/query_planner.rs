//! Search query planning
//!
//! Asks the language model for 7-10 brand-focused web queries for an idea.

use super::{fallback, llm_reply::parse_json_reply};
use crate::clients::{GenerationError, TextGenerator};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlannerReply {
    List(Vec<String>),
    Object { queries: Vec<String> },
}

/// Prompt for the query planner
pub fn build_planner_prompt(idea: &str) -> String {
    format!(
        r#"You are helping find existing products and companies that already implement an idea.

User's Idea:
{idea}

Task: Write between 7 and 10 web search queries that would surface existing products for this idea.
Each query should name only major, well-known brands or companies that are relevant to the idea
(for example "Instagram photo sharing" or "Uber ride sharing"). Do not invent company names and
do not write questions.

Respond in JSON format:
{{
  "queries": ["query 1", "query 2"]
}}"#
    )
}

/// Turns an idea into an ordered list of search queries
pub struct QueryPlanner {
    generator: Arc<dyn TextGenerator>,
}

impl QueryPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Planned queries in model order; the idea itself if planning fails
    pub async fn plan(&self, idea: &str) -> Vec<String> {
        match self.request_queries(idea).await {
            Ok(queries) => {
                debug!(count = queries.len(), "Planned search queries");
                queries
            }
            Err(e) => {
                warn!("Query planning failed, searching for the idea text: {}", e);
                fallback::planned_queries(idea)
            }
        }
    }

    async fn request_queries(&self, idea: &str) -> Result<Vec<String>, GenerationError> {
        let reply = self
            .generator
            .generate_content(&build_planner_prompt(idea))
            .await?;

        let queries = match parse_json_reply::<PlannerReply>(&reply)? {
            PlannerReply::List(queries) | PlannerReply::Object { queries } => queries,
        };

        let cleaned = clean_queries(queries);
        if cleaned.is_empty() {
            return Err(GenerationError::Parse("no usable queries".to_string()));
        }
        Ok(cleaned)
    }
}

/// Trim, drop blanks and case-insensitive duplicates, keep order
fn clean_queries(queries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty() && seen.insert(q.to_lowercase()))
        .collect()
}
