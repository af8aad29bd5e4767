//! Uniqueness pipeline
//!
//! idea → generic classification + overrides → query planning → search
//! aggregation → relevance filter → uniqueness analysis → persistence (unique
//! only) → response composition.
//!
//! Collaborator failures are absorbed at each call site (see [`fallback`]);
//! only invalid input and persistence failures reach the caller.

pub mod adjudicator;
pub mod aggregator;
pub mod composer;
pub mod fallback;
pub mod heuristics;
pub mod llm_reply;
pub mod markup;
pub mod overrides;
pub mod query_planner;
pub mod relevance;

pub use adjudicator::UniquenessAdjudicator;
pub use aggregator::ResultAggregator;
pub use composer::{ResponseComposer, SIMILAR_PROJECT_COUNT};
pub use query_planner::QueryPlanner;
pub use relevance::RelevanceFilter;

use crate::clients::{SearchProvider, TextGenerator};
use crate::types::IdeaCheckResponse;
use idea_common::config::PipelineSettings;
use idea_common::db::IdeaStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, Instrument};
use uuid::Uuid;

/// Failures that abort an idea check
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid idea: {0}")]
    InvalidInput(String),

    #[error("Failed to store idea: {0}")]
    Persistence(#[from] idea_common::Error),
}

/// Entry point of the pipeline; collaborators are injected
pub struct IdeaChecker {
    adjudicator: UniquenessAdjudicator,
    composer: ResponseComposer,
    store: Arc<dyn IdeaStore>,
}

impl IdeaChecker {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn IdeaStore>,
        settings: &PipelineSettings,
    ) -> Self {
        let aggregator = ResultAggregator::new(
            search,
            settings.max_queries,
            settings.results_per_query,
            settings.search_concurrency,
        );
        let adjudicator = UniquenessAdjudicator::new(
            generator.clone(),
            aggregator,
            RelevanceFilter::new(settings.require_product_signals),
            settings.max_analysis_results,
        );

        Self {
            adjudicator,
            composer: ResponseComposer::new(generator),
            store,
        }
    }

    /// Check one idea
    ///
    /// The returned `is_unique` is always false. Ideas judged unique
    /// internally are stored exactly once, after the verdict is final.
    pub async fn check(&self, idea: &str) -> Result<IdeaCheckResponse, PipelineError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(PipelineError::InvalidInput(
                "Idea text cannot be empty".to_string(),
            ));
        }

        let span = tracing::info_span!("check_idea", request_id = %Uuid::new_v4());
        async move {
            let adjudication = self.adjudicator.adjudicate(idea).await;
            info!(
                is_unique = adjudication.verdict.is_unique,
                source = ?adjudication.verdict.source,
                reasoning = %adjudication.verdict.reasoning,
                "Verdict reached"
            );

            if adjudication.verdict.is_unique {
                self.store.insert_idea(idea).await?;
                info!("Stored unique idea");
            }

            let similar_projects = self.composer.compose(idea, &adjudication).await;
            Ok(IdeaCheckResponse::not_unique(similar_projects))
        }
        .instrument(span)
        .await
    }
}
