//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{actors, assets, audit_logs, dashboard, health, maintenance, reservations};
use crate::error::ErrorResponse;
use crate::models::{
    actor::{Actor, CreateActor},
    asset::{Asset, CreateAsset, Dashboard, UpdateAsset},
    audit_log::{AuditLog, AuditLogEntry, AuditLogPage},
    enums::{AssetStatus, AuditAction, MaintenanceStatus, ReservationStatus},
    maintenance::{CreateMaintenance, Maintenance, MaintenanceDetails},
    reservation::{CreateReservation, Reservation, ReservationDetails},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Tracker API",
        version = "0.3.0",
        description = "Asset, reservation and maintenance tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Dashboard
        dashboard::get_dashboard,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::upload_asset_image,
        assets::delete_asset,
        // Reservations
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::checkout_reservation,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::complete_maintenance,
        // Audit
        audit_logs::list_audit_logs,
        audit_logs::export_csv,
        audit_logs::export_pdf,
        // Actors
        actors::list_actors,
        actors::create_actor,
        actors::delete_actor,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            AssetStatus,
            ReservationStatus,
            MaintenanceStatus,
            AuditAction,
            Asset,
            CreateAsset,
            UpdateAsset,
            Dashboard,
            assets::AssetResponse,
            Reservation,
            ReservationDetails,
            CreateReservation,
            reservations::ReservationResponse,
            Maintenance,
            MaintenanceDetails,
            CreateMaintenance,
            maintenance::MaintenanceResponse,
            AuditLog,
            AuditLogEntry,
            AuditLogPage,
            Actor,
            CreateActor,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Inventory overview"),
        (name = "assets", description = "Asset registry and identifier images"),
        (name = "reservations", description = "Reservation workflow"),
        (name = "maintenance", description = "Maintenance workflow"),
        (name = "audit", description = "Audit log and exports"),
        (name = "actors", description = "Actors that writes are attributed to")
    )
)]
pub struct ApiDoc;

/// Create OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
