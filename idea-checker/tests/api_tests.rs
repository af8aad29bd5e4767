//! Integration tests for idea-checker HTTP endpoints
//!
//! Collaborators are scripted; the database is in-memory SQLite.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use common::*;
use idea_checker::pipeline::IdeaChecker;
use idea_checker::{build_router, AppState};
use idea_common::config::PipelineSettings;
use idea_common::db::{ensure_default_admin, IdeaStore, SqliteIdeaStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

const ADMIN_PASSWORD: &str = "test-password";

/// Test helper: app whose model judges every non-generic idea unique
async fn setup_app() -> (Router, Arc<SqliteIdeaStore>) {
    let db = memory_db().await;
    ensure_default_admin(&db, ADMIN_PASSWORD)
        .await
        .expect("Should seed admin");

    let generator = ScriptedGenerator::new()
        .reply(
            PromptKind::Classification,
            r#"{"is_generic": false, "category": null}"#,
        )
        .reply(PromptKind::Planning, PLANNED_QUERIES)
        .reply(PromptKind::Fabrication, THREE_PROJECTS);
    let store = Arc::new(SqliteIdeaStore::new(db.clone()));
    let checker = Arc::new(IdeaChecker::new(
        Arc::new(ScriptedSearch::returning(Vec::new())),
        Arc::new(generator),
        store.clone(),
        &PipelineSettings::default(),
    ));

    let state = AppState::new(db, checker, store.clone());
    (build_router(state), store)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(credentials) = auth {
        builder = builder.header(
            header::AUTHORIZATION,
            format!("Basic {}", STANDARD.encode(credentials)),
        );
    }
    builder.body(Body::empty()).unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "idea-checker");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(get_request("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["endpoints"]["check_idea"], "POST /api/check-idea");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (app, _) = setup_app().await;

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://frontend.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// =============================================================================
// Idea checking
// =============================================================================

#[tokio::test]
async fn test_check_idea_requires_idea_field() {
    let (app, _) = setup_app().await;

    for body in ["{}", "not json", r#"{"idea": 42}"#] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/check-idea", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = extract_json(response.into_body()).await;
        assert_eq!(json["error"], "Idea text is required");
    }
}

#[tokio::test]
async fn test_check_idea_rejects_blank_idea() {
    let (app, store) = setup_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/check-idea", r#"{"idea": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"], "Idea text cannot be empty");
    assert!(store.list_ideas().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_check_idea_always_reports_not_unique() {
    let (app, store) = setup_app().await;

    let body = json!({ "idea": PLANT_IDEA }).to_string();
    let response = app
        .oneshot(json_request("POST", "/api/check-idea", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["is_unique"], false);
    let projects = json["similar_projects"].as_array().unwrap();
    assert_eq!(projects.len(), 3);
    for project in projects {
        assert!(project["title"].is_string());
        assert!(project["description"].is_string());
        assert!(project["status"].is_string());
    }

    // Nothing was found, so the idea was kept
    let stored = store.list_ideas().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].idea_text, PLANT_IDEA);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_login() {
    let (app, _) = setup_app().await;

    let ok = json!({ "username": "admin", "password": ADMIN_PASSWORD }).to_string();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/login", &ok))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");

    let wrong = json!({ "username": "admin", "password": "nope" }).to_string();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/login", &wrong))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let empty = json!({ "username": "", "password": "" }).to_string();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/login", &empty))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let missing = json!({ "username": "admin" }).to_string();
    let response = app
        .oneshot(json_request("POST", "/api/admin/login", &missing))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_ideas_requires_auth() {
    let (app, _) = setup_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/ideas", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"], "Authentication required");

    let response = app
        .oneshot(get_request("/api/admin/ideas", Some("admin:wrong")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_ideas_lists_newest_first() {
    let (app, store) = setup_app().await;
    store.insert_idea("first idea").await.unwrap();
    store.insert_idea("second idea").await.unwrap();

    let credentials = format!("admin:{}", ADMIN_PASSWORD);
    let response = app
        .oneshot(get_request("/api/admin/ideas", Some(&credentials)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["total"], 2);
    let ideas = json["ideas"].as_array().unwrap();
    assert_eq!(ideas[0]["idea_text"], "second idea");
    assert_eq!(ideas[1]["idea_text"], "first idea");
    assert!(ideas[0]["id"].is_i64());
    assert!(ideas[0]["created_at"].is_string());
}
