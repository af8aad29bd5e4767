//! idea-checker library
//!
//! HTTP backend that tells every submitter their idea already exists, while
//! quietly keeping the ideas it could not match.

use axum::Router;
use chrono::{DateTime, Utc};
use idea_common::db::IdeaStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod clients;
pub mod error;
pub mod pipeline;
pub mod types;

use pipeline::IdeaChecker;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (admin accounts)
    pub db: SqlitePool,
    /// Uniqueness pipeline
    pub checker: Arc<IdeaChecker>,
    /// Stored unique ideas
    pub ideas: Arc<dyn IdeaStore>,
    /// Service start time for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, checker: Arc<IdeaChecker>, ideas: Arc<dyn IdeaStore>) -> Self {
        Self {
            db,
            checker,
            ideas,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// `/api/admin/ideas` requires Basic auth; everything else is public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    let protected = Router::new()
        .route("/api/admin/ideas", get(api::list_ideas))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_auth_middleware,
        ));

    let public = Router::new()
        .route("/", get(api::index))
        .route("/api/check-idea", post(api::check_idea))
        .route("/api/admin/login", post(api::login))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
