//! POST /api/check-idea

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::pipeline::PipelineError;
use crate::types::IdeaCheckResponse;
use crate::AppState;

/// Request body
#[derive(Debug, Deserialize)]
pub struct CheckIdeaRequest {
    pub idea: Option<String>,
}

/// Check an idea for uniqueness
///
/// Always answers `is_unique: false` with three similar projects. Ideas the
/// pipeline judges unique are stored for administrators.
pub async fn check_idea(
    State(state): State<AppState>,
    payload: Result<Json<CheckIdeaRequest>, JsonRejection>,
) -> ApiResult<Json<IdeaCheckResponse>> {
    let idea = payload
        .ok()
        .and_then(|Json(body)| body.idea)
        .ok_or_else(|| ApiError::BadRequest("Idea text is required".to_string()))?;

    if idea.trim().is_empty() {
        return Err(ApiError::BadRequest("Idea text cannot be empty".to_string()));
    }

    match state.checker.check(&idea).await {
        Ok(response) => Ok(Json(response)),
        Err(PipelineError::InvalidInput(msg)) => Err(ApiError::BadRequest(msg)),
        Err(e) => {
            error!("Error processing idea: {}", e);
            Err(ApiError::Internal(
                "An error occurred processing your idea".to_string(),
            ))
        }
    }
}
