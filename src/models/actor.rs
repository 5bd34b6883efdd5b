//! Actor model (people credited in the audit log)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Actor {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActor {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
}
