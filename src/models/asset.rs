//! Asset model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::enums::AssetStatus;
use super::maintenance::MaintenanceDetails;

/// Asset record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    pub name: String,
    /// Globally unique serial number
    pub serial_number: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Stored picture, relative to the media root
    pub image: Option<String>,
    /// Generated identifier image, relative to the media root
    pub qr_code: Option<String>,
    pub status: AssetStatus,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub serial_number: String,
    #[validate(length(max = 255))]
    pub category: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Values are stored trimmed, so whitespace alone counts as empty
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Update asset request. Missing or blank fields keep their current value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub serial_number: Option<String>,
    #[validate(length(max = 255))]
    pub category: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub status: Option<AssetStatus>,
}

impl UpdateAsset {
    /// Apply the non-blank fields on top of an existing asset
    pub fn apply_to(&self, asset: &Asset) -> Asset {
        fn pick(new: &Option<String>) -> Option<String> {
            new.as_ref()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        Asset {
            name: pick(&self.name).unwrap_or_else(|| asset.name.clone()),
            serial_number: pick(&self.serial_number).unwrap_or_else(|| asset.serial_number.clone()),
            category: pick(&self.category).or_else(|| asset.category.clone()),
            location: pick(&self.location).or_else(|| asset.location.clone()),
            status: self.status.unwrap_or(asset.status),
            ..asset.clone()
        }
    }
}

/// Query parameters for the asset list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    /// Only assets in this status
    pub status: Option<AssetStatus>,
}

/// Overview counters and recent activity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dashboard {
    pub total_assets: i64,
    pub available_assets: i64,
    pub unavailable_assets: i64,
    pub recent_assets: Vec<Asset>,
    pub recent_maintenances: Vec<MaintenanceDetails>,
}
