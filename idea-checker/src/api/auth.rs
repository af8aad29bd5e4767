//! HTTP Basic authentication for admin routes
//!
//! Credentials are checked against the `admins` table on every request.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use tracing::{error, warn};

use crate::AppState;
use idea_common::db::verify_admin;

/// Username and password taken from a Basic `Authorization` header
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Parse `Basic <base64(username:password)>`
///
/// Returns None for any other scheme or a malformed payload. The password
/// may itself contain colons.
pub fn parse_basic_auth(header_value: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Authentication middleware for admin routes
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_auth)
        .ok_or(AuthError::MissingCredentials)?;

    let valid = verify_admin(&state.db, &credentials.username, &credentials.password)
        .await
        .map_err(|e| {
            error!("Admin lookup failed: {}", e);
            AuthError::Internal
        })?;

    if !valid {
        warn!(username = %credentials.username, "Rejected admin credentials");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}

/// Authentication failures
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    InvalidCredentials,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                crate::error::INTERNAL_ERROR_MESSAGE,
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
