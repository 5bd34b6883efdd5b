//! Asset endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetQuery, CreateAsset, UpdateAsset},
};

use super::ActingActor;

/// Multipart field carrying the uploaded picture
const IMAGE_FIELD: &str = "image";

/// Asset write response
#[derive(Serialize, ToSchema)]
pub struct AssetResponse {
    /// Status message
    pub message: String,
    pub asset: Asset,
}

/// List assets, optionally filtered by status
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetQuery),
    responses(
        (status = 200, description = "Assets ordered by name", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.assets.list(&query).await?;
    Ok(Json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.get_by_id(id).await?;
    Ok(Json(asset))
}

/// Register a new asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    params(("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")),
    responses(
        (status = 201, description = "Asset created", body = AssetResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already in use")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<AssetResponse>)> {
    let asset = state.services.assets.create(&data, actor_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(AssetResponse {
            message: "Asset created.".to_string(),
            asset,
        }),
    ))
}

/// Update an asset; blank fields keep their current value
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(
        ("id" = i32, Path, description = "Asset ID"),
        ("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")
    ),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = AssetResponse),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Serial number already in use")
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAsset>,
) -> AppResult<Json<AssetResponse>> {
    let asset = state.services.assets.update(id, &data, actor_id).await?;
    Ok(Json(AssetResponse {
        message: "Asset updated.".to_string(),
        asset,
    }))
}

/// Upload the asset picture (multipart field `image`)
#[utoipa::path(
    post,
    path = "/assets/{id}/image",
    tag = "assets",
    params(
        ("id" = i32, Path, description = "Asset ID"),
        ("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Picture in field `image`"),
    responses(
        (status = 200, description = "Image stored", body = AssetResponse),
        (status = 400, description = "Missing or unsupported file"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn upload_asset_image(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<Json<AssetResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let asset = state
            .services
            .assets
            .upload_image(id, &file_name, &bytes, actor_id)
            .await?;
        return Ok(Json(AssetResponse {
            message: "Image uploaded.".to_string(),
            asset,
        }));
    }

    Err(AppError::BadRequest(format!("Missing '{}' file field", IMAGE_FIELD)))
}

/// Delete an asset along with its reservations and maintenance records
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(
        ("id" = i32, Path, description = "Asset ID"),
        ("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")
    ),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.assets.delete(id, actor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
