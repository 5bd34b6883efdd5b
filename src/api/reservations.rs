//! Reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reservation::{CreateReservation, Reservation, ReservationDetails},
};

use super::ActingActor;

/// Reservation write response
#[derive(Serialize, ToSchema)]
pub struct ReservationResponse {
    /// Status message
    pub message: String,
    pub reservation: Reservation,
}

/// List reservations, latest check-in first
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservations with asset names", body = Vec<ReservationDetails>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.reservations.list().await?;
    Ok(Json(reservations))
}

/// Book an asset
///
/// `check_in` accepts `YYYY-MM-DD` or an ISO date-time; `days` defaults to 1.
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    params(("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")),
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "Invalid date or request"),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Asset not available (strict lifecycle only)")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    let reservation = state.services.reservations.create(&data, actor_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            message: "Reservation created.".to_string(),
            reservation,
        }),
    ))
}

/// Check a reservation out, making its asset available again
#[utoipa::path(
    post,
    path = "/reservations/{id}/checkout",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID"),
        ("X-Actor-Id" = Option<i32>, Header, description = "Acting actor")
    ),
    responses(
        (status = 200, description = "Reservation checked out", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation already checked out (strict lifecycle only)")
    )
)]
pub async fn checkout_reservation(
    State(state): State<crate::AppState>,
    ActingActor(actor_id): ActingActor,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = state.services.reservations.checkout(id, actor_id).await?;
    Ok(Json(ReservationResponse {
        message: "Asset checked out successfully and is now available again.".to_string(),
        reservation,
    }))
}
