//! Dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::asset::Dashboard};

/// Asset counts with the latest assets and maintenance records
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = Dashboard)
    )
)]
pub async fn get_dashboard(State(state): State<crate::AppState>) -> AppResult<Json<Dashboard>> {
    let dashboard = state.services.assets.dashboard().await?;
    Ok(Json(dashboard))
}
