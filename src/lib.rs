//! Asset Tracker
//!
//! A REST JSON API for tracking physical assets through reservations and
//! maintenance, with an append-only audit log exportable as CSV or PDF.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod identifier;
pub mod lifecycle;
pub mod models;
pub mod reports;
pub mod repository;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let media = ServeDir::new(&state.config.media.root);
    let media_path = state.config.media.base_url.trim_end_matches('/').to_string();

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .route("/dashboard", get(api::dashboard::get_dashboard))
        // Assets
        .route("/assets", get(api::assets::list_assets).post(api::assets::create_asset))
        .route(
            "/assets/:id",
            get(api::assets::get_asset)
                .put(api::assets::update_asset)
                .delete(api::assets::delete_asset),
        )
        .route("/assets/:id/image", post(api::assets::upload_asset_image))
        // Reservations
        .route(
            "/reservations",
            get(api::reservations::list_reservations).post(api::reservations::create_reservation),
        )
        .route("/reservations/:id/checkout", post(api::reservations::checkout_reservation))
        // Maintenance
        .route(
            "/maintenance",
            get(api::maintenance::list_maintenance).post(api::maintenance::create_maintenance),
        )
        .route("/maintenance/:id/complete", post(api::maintenance::complete_maintenance))
        // Audit log
        .route("/audit-logs", get(api::audit_logs::list_audit_logs))
        .route("/audit-logs/export/csv", get(api::audit_logs::export_csv))
        .route("/audit-logs/export/pdf", get(api::audit_logs::export_pdf))
        // Actors
        .route("/actors", get(api::actors::list_actors).post(api::actors::create_actor))
        .route("/actors/:id", axum::routing::delete(api::actors::delete_actor))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service(&media_path, media)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
