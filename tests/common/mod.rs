#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use asset_tracker::{
    config::{AppConfig, LifecycleConfig, MediaConfig},
    create_router,
    lifecycle::LifecyclePolicy,
    repository::Repository,
    services::Services,
    storage::MediaStore,
    AppState,
};

/// Router under test plus the media directory it writes into.
///
/// The directory is removed when the value is dropped.
pub struct TestApp {
    pub router: Router,
    pub media: TempDir,
}

/// Build the full router over the given pool with the default permissive lifecycle.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, LifecycleConfig::default())
}

pub fn build_test_app_with(pool: PgPool, lifecycle: LifecycleConfig) -> TestApp {
    let media = tempfile::tempdir().expect("temp media dir");
    let config = AppConfig {
        media: MediaConfig {
            root: media.path().to_path_buf(),
            base_url: "/media".to_string(),
        },
        lifecycle,
        ..AppConfig::default()
    };

    let services = Services::new(
        Repository::new(pool),
        MediaStore::new(&config.media),
        LifecyclePolicy::from(config.lifecycle),
        config.reports.clone(),
    );
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    TestApp {
        router: create_router(state),
        media,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn post_empty(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Register an asset and return its id.
pub async fn create_asset(app: &TestApp, name: &str, serial: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/assets",
        serde_json::json!({ "name": name, "serial_number": serial }),
    )
    .await;
    assert_eq!(response.status(), 201, "asset creation failed");
    body_json(response).await["asset"]["id"]
        .as_i64()
        .expect("asset id")
}

/// Count audit rows with the given action for an asset.
pub async fn audit_count(pool: &PgPool, asset_id: i64, action: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM audit_logs WHERE asset_id = $1 AND action::text = $2",
    )
    .bind(asset_id as i32)
    .bind(action)
    .fetch_one(pool)
    .await
    .expect("audit count")
}
