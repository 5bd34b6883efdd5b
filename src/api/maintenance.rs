//! Maintenance endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenance, Maintenance, MaintenanceDetails},
};

use super::ActingActor;

/// Maintenance write response
#[derive(Serialize, ToSchema)]
pub struct MaintenanceResponse {
    /// Status message
    pub message: String,
    pub maintenance: Maintenance,
}

#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    responses(
        (status = 200, description = "Maintenance records, latest start first", body = Vec<MaintenanceDetails>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MaintenanceDetails>>> {
    let records = state.services.maintenance.list().await?;
    Ok(Json(records))
}

/// Schedule maintenance for an asset
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenance,
    params(("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")),
    responses(
        (status = 201, description = "Maintenance scheduled", body = MaintenanceResponse),
        (status = 400, description = "Invalid date or request"),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Asset not available (strict lifecycle only)")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceResponse>)> {
    let maintenance = state.services.maintenance.create(&data, actor_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MaintenanceResponse {
            message: "Maintenance scheduled.".to_string(),
            maintenance,
        }),
    ))
}

/// Mark maintenance done, making its asset available again
#[utoipa::path(
    post,
    path = "/maintenance/{id}/complete",
    tag = "maintenance",
    params(
        ("id" = i32, Path, description = "Maintenance ID"),
        ("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")
    ),
    responses(
        (status = 200, description = "Maintenance completed", body = MaintenanceResponse),
        (status = 404, description = "Maintenance not found"),
        (status = 409, description = "Maintenance already done (strict lifecycle only)")
    )
)]
pub async fn complete_maintenance(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceResponse>> {
    let (maintenance, asset_name) = state.services.maintenance.complete(id, actor_id).await?;
    Ok(Json(MaintenanceResponse {
        message: format!("{} maintenance completed.", asset_name),
        maintenance,
    }))
}
