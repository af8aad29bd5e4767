//! Stored ideas
//!
//! Ideas are append-only: inserted once when judged unique, never updated or
//! deleted, and listed newest-first for administrators.

use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// An idea persisted after an internal "unique" verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredIdea {
    pub id: i64,
    pub idea_text: String,
    pub created_at: DateTime<Utc>,
}

/// Persistence collaborator for ideas
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Append one idea
    async fn insert_idea(&self, idea_text: &str) -> Result<()>;

    /// All stored ideas, newest first
    async fn list_ideas(&self) -> Result<Vec<StoredIdea>>;
}

/// SQLite-backed [`IdeaStore`]
#[derive(Clone)]
pub struct SqliteIdeaStore {
    db: SqlitePool,
}

impl SqliteIdeaStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdeaStore for SqliteIdeaStore {
    async fn insert_idea(&self, idea_text: &str) -> Result<()> {
        if idea_text.trim().is_empty() {
            return Err(Error::InvalidInput("idea text is empty".to_string()));
        }

        // Fixed-width RFC 3339 so text ordering matches time ordering
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut tx = self.db.begin().await?;
        sqlx::query("INSERT INTO ideas (idea_text, created_at) VALUES (?, ?)")
            .bind(idea_text)
            .bind(&created_at)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(created_at = %created_at, "Stored idea");
        Ok(())
    }

    async fn list_ideas(&self) -> Result<Vec<StoredIdea>> {
        let rows = sqlx::query(
            "SELECT id, idea_text, created_at FROM ideas ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await?;

        rows.iter()
            .map(|row| {
                let raw: String = row.get("created_at");
                let created_at = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        Error::CorruptRecord(format!("ideas.created_at '{}': {}", raw, e))
                    })?
                    .with_timezone(&Utc);
                Ok(StoredIdea {
                    id: row.get("id"),
                    idea_text: row.get("idea_text"),
                    created_at,
                })
            })
            .collect()
    }
}
