//! Uniqueness adjudication
//!
//! Decision order:
//! 1. Ask the model whether the idea is a well-known, already-solved category
//! 2. Run the override rules, which can only clear that classification
//! 3. Generic → not unique, no search and no analysis
//! 4. Otherwise plan queries, aggregate results, filter for relevance
//! 5. Nothing relevant → unique, no analysis
//! 6. Otherwise the model judges the idea against the top relevant results

use super::aggregator::ResultAggregator;
use super::llm_reply::parse_json_reply;
use super::overrides::{apply_overrides, GENERIC_OVERRIDES};
use super::query_planner::QueryPlanner;
use super::relevance::RelevanceFilter;
use super::fallback;
use crate::clients::{GenerationError, TextGenerator};
use crate::types::{Adjudication, SearchResult, UniquenessVerdict, VerdictSource};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const GENERIC_CATEGORY_REASONING: &str =
    "This idea belongs to a well-known product category with many established competitors";

pub const NO_COMPETITORS_REASONING: &str = "No relevant competitors found";

#[derive(Debug, Deserialize)]
struct GenericReply {
    is_generic: bool,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysisReply {
    is_unique: bool,
    #[serde(default)]
    reasoning: String,
}

/// Prompt for the generic-category classification
pub fn build_generic_prompt(idea: &str) -> String {
    format!(
        r#"You are classifying product ideas.

User's Idea:
{idea}

Task: Decide whether this idea is a generic, well-known product category that is already
solved by major companies (for example "a photo sharing app", "a ride sharing service",
"an online store", "a to-do list app"). Specific, unusual or niche twists on a category are
NOT generic.

Respond in JSON format:
{{
  "is_generic": true/false,
  "category": "Name of the well-known category, or null"
}}"#
    )
}

/// Prompt for the final uniqueness analysis
pub fn build_analysis_prompt(idea: &str, results: &[SearchResult]) -> String {
    let search_context = if results.is_empty() {
        "No relevant search results found.".to_string()
    } else {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "Result {}:\nTitle: {}\nDescription: {}\nURL: {}",
                    i + 1,
                    r.title,
                    r.description,
                    r.url
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!(
        r#"You are analyzing whether an idea is truly unique and original.

User's Idea:
{idea}

Search Results Found:
{search_context}

Task: Determine if this idea is unique. An idea is considered NOT unique if:
- There's a website, product, or service that implements this exact concept
- There's a patent or company working on this specific idea
- There are blog posts or articles describing this implementation

An idea IS unique if:
- No direct implementations exist (only tangentially related things)
- The search results are generic or unrelated
- No one has built or patented this specific thing

Respond in JSON format:
{{
  "is_unique": true/false,
  "reasoning": "Brief explanation of why it is or isn't unique"
}}"#
    )
}

/// Produces the internal uniqueness verdict for an idea
pub struct UniquenessAdjudicator {
    generator: Arc<dyn TextGenerator>,
    planner: QueryPlanner,
    aggregator: ResultAggregator,
    relevance: RelevanceFilter,
    max_analysis_results: usize,
}

impl UniquenessAdjudicator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        aggregator: ResultAggregator,
        relevance: RelevanceFilter,
        max_analysis_results: usize,
    ) -> Self {
        Self {
            planner: QueryPlanner::new(generator.clone()),
            generator,
            aggregator,
            relevance,
            max_analysis_results: max_analysis_results.max(1),
        }
    }

    pub async fn adjudicate(&self, idea: &str) -> Adjudication {
        let classified = self.classify_generic(idea).await;
        let outcome = apply_overrides(GENERIC_OVERRIDES, idea, classified);

        if outcome.generic {
            info!("Idea classified as a well-known category; skipping search");
            return Adjudication {
                verdict: UniquenessVerdict {
                    is_unique: false,
                    reasoning: GENERIC_CATEGORY_REASONING.to_string(),
                    source: VerdictSource::GenericCategory,
                },
                relevant: Vec::new(),
            };
        }

        let queries = self.planner.plan(idea).await;
        let candidates = self.aggregator.aggregate(&queries).await;
        let relevant = self.relevance.filter(idea, candidates);

        if relevant.is_empty() {
            info!("No relevant competitors found");
            return Adjudication {
                verdict: UniquenessVerdict {
                    is_unique: true,
                    reasoning: NO_COMPETITORS_REASONING.to_string(),
                    source: VerdictSource::NoRelevantResults,
                },
                relevant,
            };
        }

        let verdict = self.analyze(idea, &relevant).await;
        info!(
            is_unique = verdict.is_unique,
            relevant = relevant.len(),
            "Uniqueness analysis complete"
        );
        Adjudication { verdict, relevant }
    }

    /// Generic-category classification; not generic when the model fails
    async fn classify_generic(&self, idea: &str) -> bool {
        match self.request_generic(idea).await {
            Ok(reply) => {
                if reply.is_generic {
                    info!(
                        category = reply.category.as_deref().unwrap_or("unspecified"),
                        "Model classified idea as generic"
                    );
                }
                reply.is_generic
            }
            Err(e) => {
                warn!("Generic classification failed, assuming not generic: {}", e);
                fallback::generic_classification()
            }
        }
    }

    async fn request_generic(&self, idea: &str) -> Result<GenericReply, GenerationError> {
        let reply = self
            .generator
            .generate_content(&build_generic_prompt(idea))
            .await?;
        parse_json_reply(&reply)
    }

    /// Model verdict over the top relevant results; fail-open on error
    async fn analyze(&self, idea: &str, relevant: &[SearchResult]) -> UniquenessVerdict {
        let top = &relevant[..relevant.len().min(self.max_analysis_results)];
        match self.request_analysis(idea, top).await {
            Ok(reply) => UniquenessVerdict {
                is_unique: reply.is_unique,
                reasoning: reply.reasoning,
                source: VerdictSource::Analysis,
            },
            Err(e) => {
                warn!("Uniqueness analysis failed, treating idea as unique: {}", e);
                fallback::analysis_verdict()
            }
        }
    }

    async fn request_analysis(
        &self,
        idea: &str,
        results: &[SearchResult],
    ) -> Result<AnalysisReply, GenerationError> {
        let reply = self
            .generator
            .generate_content(&build_analysis_prompt(idea, results))
            .await?;
        parse_json_reply(&reply)
    }
}
