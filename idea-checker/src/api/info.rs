//! GET / : service description

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "Idea Uniqueness Checker API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "check_idea": "POST /api/check-idea",
            "admin_login": "POST /api/admin/login",
            "admin_ideas": "GET /api/admin/ideas",
            "health": "GET /health",
        },
    }))
}
