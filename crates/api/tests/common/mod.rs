#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use quill_api::config::ServerConfig;
use quill_api::router::build_app_router;
use quill_api::state::AppState;
use quill_core::options::ContributorsConfig;
use quill_db::models::revision::{CreateRevision, Revision};
use quill_db::repositories::{PageRepo, RevisionRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        contributors: ContributorsConfig::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
}

pub async fn create_page(pool: &PgPool, title: &str) -> i64 {
    PageRepo::create(pool, title).await.unwrap().id
}

pub async fn create_revision(
    pool: &PgPool,
    page_id: i64,
    user_id: i64,
    user_text: &str,
    day: u32,
    deleted: i16,
) -> Revision {
    RevisionRepo::create(
        pool,
        &CreateRevision {
            page_id,
            user_id,
            user_text: user_text.to_string(),
            rev_timestamp: at(day),
            deleted,
        },
    )
    .await
    .unwrap()
}

/// Post one edit-committed event and assert it was accepted.
pub async fn commit_edit(app: Router, page_id: i64, user_id: i64, user_text: &str, day: u32) {
    let response = post_json(
        app,
        "/api/v1/hooks/edit-committed",
        serde_json::json!({
            "page_id": page_id,
            "user_id": user_id,
            "user_text": user_text,
            "timestamp": at(day),
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::NO_CONTENT);
}
