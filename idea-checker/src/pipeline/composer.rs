//! Response composition
//!
//! Always produces exactly [`SIMILAR_PROJECT_COUNT`] entries:
//! - unique verdict → fabricated projects only
//! - not unique, nothing relevant (generic short-circuit) → fixed brand placeholders
//! - not unique otherwise → real relevant results, topped up with fabricated ones

use super::fallback;
use super::llm_reply::parse_json_reply;
use super::markup::strip_markup;
use crate::clients::{GenerationError, TextGenerator};
use crate::types::{Adjudication, SearchResult, SimilarProject};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entries in every response
pub const SIMILAR_PROJECT_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FabricationReply {
    Object { projects: Vec<ProjectReply> },
    List(Vec<ProjectReply>),
}

#[derive(Debug, Deserialize)]
struct ProjectReply {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: String,
}

/// Prompt for fabricated competitor projects
pub fn build_fabrication_prompt(idea: &str, count: usize) -> String {
    format!(
        r#"You are creating fictional but believable project descriptions.

User's Idea:
{idea}

Task: Create {count} fictional projects/companies/websites that claim to have already implemented this idea. Make them sound realistic and professional. Include:
1. A plausible company/project name
2. A convincing description of how they implemented the idea
3. A realistic status (choose from: "Patented by [Company Name]", "Currently in private beta", "Website under construction", "Acquired by [Big Tech Company]", "Launched in [Year]")

Make each one unique and believable. Respond in JSON format:
{{
  "projects": [
    {{
      "title": "Project/Company Name",
      "description": "Detailed description of the implementation",
      "status": "Status message"
    }}
  ]
}}"#
    )
}

/// Fixed entries used when a generic idea short-circuits the search
pub fn placeholder_projects() -> Vec<SimilarProject> {
    vec![
        SimilarProject::new(
            "Google",
            "Google offers established products in this category to billions of users across its ecosystem.",
            "Live at https://www.google.com",
        ),
        SimilarProject::new(
            "Meta",
            "Meta runs large-scale consumer apps that already cover this use case.",
            "Live at https://www.meta.com",
        ),
        SimilarProject::new(
            "Amazon",
            "Amazon provides mature services and devices addressing this need.",
            "Live at https://www.amazon.com",
        ),
    ]
}

/// Map a real search result to a response entry
pub fn from_search_result(result: &SearchResult) -> SimilarProject {
    SimilarProject::new(
        strip_markup(&result.title),
        strip_markup(&result.description),
        format!("Live at {}", result.url),
    )
}

/// Builds the `similar_projects` list
pub struct ResponseComposer {
    generator: Arc<dyn TextGenerator>,
}

impl ResponseComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn compose(&self, idea: &str, adjudication: &Adjudication) -> Vec<SimilarProject> {
        let projects = if adjudication.verdict.is_unique {
            self.fabricate(idea, SIMILAR_PROJECT_COUNT).await
        } else if adjudication.relevant.is_empty() {
            placeholder_projects()
        } else {
            let mut projects: Vec<SimilarProject> = adjudication
                .relevant
                .iter()
                .take(SIMILAR_PROJECT_COUNT)
                .map(from_search_result)
                .collect();
            let missing = SIMILAR_PROJECT_COUNT - projects.len();
            if missing > 0 {
                projects.extend(self.fabricate(idea, missing).await);
            }
            projects
        };

        exactly(projects, SIMILAR_PROJECT_COUNT)
    }

    /// `count` fabricated projects; confidential placeholders fill any gap
    pub async fn fabricate(&self, idea: &str, count: usize) -> Vec<SimilarProject> {
        if count == 0 {
            return Vec::new();
        }
        match self.request_projects(idea, count).await {
            Ok(projects) => {
                debug!(requested = count, received = projects.len(), "Fabricated projects");
                exactly(projects, count)
            }
            Err(e) => {
                warn!("Project fabrication failed, using confidential entries: {}", e);
                fallback::fabricated_projects(count)
            }
        }
    }

    async fn request_projects(
        &self,
        idea: &str,
        count: usize,
    ) -> Result<Vec<SimilarProject>, GenerationError> {
        let reply = self
            .generator
            .generate_content(&build_fabrication_prompt(idea, count))
            .await?;

        let projects = match parse_json_reply::<FabricationReply>(&reply)? {
            FabricationReply::Object { projects } | FabricationReply::List(projects) => projects,
        };

        Ok(projects
            .into_iter()
            .map(|p| {
                SimilarProject::new(
                    strip_markup(&p.title),
                    strip_markup(&p.description),
                    strip_markup(&p.status),
                )
            })
            .filter(|p| !p.title.is_empty())
            .collect())
    }
}

/// Truncate or pad with confidential entries to exactly `count`
fn exactly(mut projects: Vec<SimilarProject>, count: usize) -> Vec<SimilarProject> {
    projects.truncate(count);
    let missing = count - projects.len();
    projects.extend(fallback::fabricated_projects(missing));
    projects
}
