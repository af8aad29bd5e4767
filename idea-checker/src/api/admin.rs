//! Admin endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use idea_common::db::{verify_admin, StoredIdea};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct IdeaListResponse {
    pub ideas: Vec<StoredIdea>,
    pub total: usize,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let (username, password) = match payload {
        Ok(Json(LoginRequest {
            username: Some(username),
            password: Some(password),
        })) => (username, password),
        _ => {
            return Err(ApiError::BadRequest(
                "Username and password are required".to_string(),
            ))
        }
    };

    if !verify_admin(&state.db, &username, &password).await? {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    info!(username = %username, "Admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}

/// GET /api/admin/ideas
///
/// Requires Basic auth (see [`super::auth::admin_auth_middleware`]).
pub async fn list_ideas(State(state): State<AppState>) -> ApiResult<Json<IdeaListResponse>> {
    let ideas = state.ideas.list_ideas().await?;
    Ok(Json(IdeaListResponse {
        total: ideas.len(),
        ideas,
    }))
}
