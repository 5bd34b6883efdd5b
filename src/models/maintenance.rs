//! Maintenance model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::MaintenanceStatus;

/// Maintenance record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub asset_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub hours: Option<i32>,
    /// Cost, two decimal places
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
}

/// Maintenance record joined with its asset, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceDetails {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub hours: Option<i32>,
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
}

/// Largest cost a NUMERIC(10,2) column holds
const MAX_COST: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

/// Create maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "cost_in_range"))]
pub struct CreateMaintenance {
    pub asset_id: i32,
    /// Start (ISO 8601 date or date-time)
    pub start_date: String,
    /// End (ISO 8601 date or date-time)
    pub end_date: String,
    #[validate(range(min = 0))]
    pub hours: Option<i32>,
    /// Between 0 and 99999999.99, rounded to cents
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}

fn cost_in_range(data: &CreateMaintenance) -> Result<(), ValidationError> {
    match data.cost.map(|c| c.round_dp(2)) {
        Some(cost) if cost < Decimal::ZERO => Err(ValidationError::new("cost_negative")),
        Some(cost) if cost > MAX_COST => Err(ValidationError::new("cost_too_large")),
        _ => Ok(()),
    }
}

/// Validated maintenance data ready to be written
#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub asset_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub hours: Option<i32>,
    pub cost: Option<Decimal>,
    pub notes: String,
}
