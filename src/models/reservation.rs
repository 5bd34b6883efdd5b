//! Reservation model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ReservationStatus;
use crate::error::{AppError, AppResult};

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    /// Free-text name of the person holding the asset
    pub holder_name: String,
    pub asset_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub days: i32,
    pub status: ReservationStatus,
}

/// Reservation joined with its asset, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub holder_name: String,
    pub asset_id: i32,
    pub asset_name: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub days: i32,
    pub status: ReservationStatus,
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub asset_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub holder_name: String,
    /// Check-in date (`YYYY-MM-DD`) or date-time (ISO 8601)
    pub check_in: String,
    /// Reservation length in days (defaults to 1)
    #[validate(range(min = 0, max = 3650))]
    pub days: Option<i32>,
}

/// Validated reservation data ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub asset_id: i32,
    pub holder_name: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub days: i32,
}

impl NewReservation {
    /// Booking window: check-out falls `days` whole days after check-in.
    /// A window ending past the representable calendar is an invalid date.
    pub fn new(asset_id: i32, holder_name: String, check_in: DateTime<Utc>, days: i32) -> AppResult<Self> {
        let check_out = check_in
            .checked_add_signed(Duration::days(days.into()))
            .ok_or_else(|| AppError::InvalidDate("Invalid date format.".to_string()))?;
        Ok(Self {
            asset_id,
            holder_name,
            check_in,
            check_out,
            days,
        })
    }
}
