//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use idea_checker::clients::{GenerationError, SearchError, SearchProvider, TextGenerator};
use idea_checker::types::SearchResult;
use idea_common::db::{IdeaStore, StoredIdea};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Which prompt a generator call answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Classification,
    Planning,
    Analysis,
    Fabrication,
}

fn prompt_kind(prompt: &str) -> Option<PromptKind> {
    if prompt.contains("You are classifying product ideas") {
        Some(PromptKind::Classification)
    } else if prompt.contains("You are analyzing whether an idea") {
        Some(PromptKind::Analysis)
    } else if prompt.contains("web search queries") {
        Some(PromptKind::Planning)
    } else if prompt.contains("fictional") {
        Some(PromptKind::Fabrication)
    } else {
        None
    }
}

/// Replies by prompt kind; a missing reply is a generation failure
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: HashMap<PromptKind, String>,
    calls: Mutex<Vec<PromptKind>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, kind: PromptKind, text: &str) -> Self {
        self.replies.insert(kind, text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PromptKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.calls().into_iter().filter(|k| *k == kind).count()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        let kind = prompt_kind(prompt).expect("unrecognised prompt");
        self.calls.lock().unwrap().push(kind);
        self.replies
            .get(&kind)
            .cloned()
            .ok_or_else(|| GenerationError::Api(503, "scripted failure".to_string()))
    }
}

/// Returns the same results for every query and records the queries
pub struct ScriptedSearch {
    results: Vec<SearchResult>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            results: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search(&self, query: &str, _count: u32) -> Result<Vec<SearchResult>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(SearchError::Network("connection refused".to_string()));
        }
        Ok(self.results.clone())
    }
}

/// In-memory store that counts inserts; can be told to fail
#[derive(Default)]
pub struct CountingIdeaStore {
    ideas: Mutex<Vec<String>>,
    inserts: AtomicUsize,
    fail: bool,
}

impl CountingIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<String> {
        self.ideas.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdeaStore for CountingIdeaStore {
    async fn insert_idea(&self, idea_text: &str) -> idea_common::Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(idea_common::Error::Config("store unavailable".to_string()));
        }
        self.ideas.lock().unwrap().push(idea_text.to_string());
        Ok(())
    }

    async fn list_ideas(&self) -> idea_common::Result<Vec<StoredIdea>> {
        Ok(Vec::new())
    }
}

/// Fresh in-memory database with tables created
pub async fn memory_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    idea_common::db::create_tables(&pool)
        .await
        .expect("Should create tables");
    pool
}

pub const PLANT_IDEA: &str = "A mobile app for tracking plant watering schedules";

pub const PLANNED_QUERIES: &str = r#"{"queries": ["Planta plant care app", "Greg plant watering", "Blossom app"]}"#;

pub const THREE_PROJECTS: &str = r#"{"projects": [
  {"title": "Verdant Labs", "description": "Automated watering reminders", "status": "Currently in private beta"},
  {"title": "LeafLine", "description": "Plant schedules for busy people", "status": "Launched in 2019"},
  {"title": "HydroHabit", "description": "Smart pots with tracking", "status": "Acquired by Google"}
]}"#;

/// Search hit that passes both relevance checks for [`PLANT_IDEA`]
pub fn plant_result(url: &str) -> SearchResult {
    SearchResult::new(
        "PlantPal watering app",
        "Mobile platform for tracking plant watering schedules",
        url,
    )
}
