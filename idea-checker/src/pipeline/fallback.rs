//! Fallback values, one per collaborator call site
//!
//! | Call site               | Fallback                                      |
//! |-------------------------|-----------------------------------------------|
//! | generic classification  | not generic                                   |
//! | query planning          | the idea text as the only query               |
//! | search (per query)      | no results                                    |
//! | uniqueness analysis     | unique (fail-open)                            |
//! | fabrication             | confidential-project entries                  |

use crate::types::{SearchResult, SimilarProject, UniquenessVerdict, VerdictSource};

pub const ANALYSIS_UNAVAILABLE_REASONING: &str =
    "Unable to determine uniqueness; treating as unique";

pub fn generic_classification() -> bool {
    false
}

pub fn planned_queries(idea: &str) -> Vec<String> {
    vec![idea.to_string()]
}

pub fn search_results() -> Vec<SearchResult> {
    Vec::new()
}

pub fn analysis_verdict() -> UniquenessVerdict {
    UniquenessVerdict {
        is_unique: true,
        reasoning: ANALYSIS_UNAVAILABLE_REASONING.to_string(),
        source: VerdictSource::AnalysisUnavailable,
    }
}

const CONFIDENTIAL_PROJECTS: &[(&str, &str, &str)] = &[
    (
        "Confidential Industry Project",
        "A private company has patented a similar concept. Due to NDA restrictions, detailed information is not publicly available.",
        "Patented (details confidential)",
    ),
    (
        "Stealth-Mode Venture",
        "An early-stage startup is building this concept and has not yet announced its product publicly.",
        "Currently in private beta",
    ),
    (
        "Corporate R&D Initiative",
        "A large technology company is developing a comparable solution as part of an internal research program.",
        "Website under construction",
    ),
];

/// `count` fabricated entries, cycling through the confidential set
pub fn fabricated_projects(count: usize) -> Vec<SimilarProject> {
    CONFIDENTIAL_PROJECTS
        .iter()
        .cycle()
        .take(count)
        .map(|(title, description, status)| SimilarProject::new(*title, *description, *status))
        .collect()
}
