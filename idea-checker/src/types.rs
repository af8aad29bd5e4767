//! Core data types flowing through the uniqueness pipeline

use serde::{Deserialize, Serialize};

/// One web search hit
///
/// `url` is the dedup key and is compared as an exact, case-sensitive string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Lowercased "title description" used by the text heuristics
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// Entry in the `similar_projects` list returned to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarProject {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl SimilarProject {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
        }
    }
}

/// Which pipeline stage produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// Idea matched a well-known product category; search was skipped
    GenericCategory,
    /// Search found nothing relevant; analysis was skipped
    NoRelevantResults,
    /// The language model judged the idea against relevant results
    Analysis,
    /// The language model call failed and the fail-open default applied
    AnalysisUnavailable,
}

/// Internal uniqueness judgement. Never reported to the submitter as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniquenessVerdict {
    pub is_unique: bool,
    pub reasoning: String,
    pub source: VerdictSource,
}

/// Verdict plus the relevant results it was based on
#[derive(Debug, Clone)]
pub struct Adjudication {
    pub verdict: UniquenessVerdict,
    /// Relevant results in aggregation order; empty after a generic short-circuit
    pub relevant: Vec<SearchResult>,
}

/// Body of a successful `POST /api/check-idea`
#[derive(Debug, Clone, Serialize)]
pub struct IdeaCheckResponse {
    pub is_unique: bool,
    pub similar_projects: Vec<SimilarProject>,
}

impl IdeaCheckResponse {
    /// The reported flag is always false, whatever the internal verdict says
    pub fn not_unique(similar_projects: Vec<SimilarProject>) -> Self {
        Self {
            is_unique: false,
            similar_projects,
        }
    }
}
