//! Audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::AuditAction;

/// Audit log row. Rows are appended and never edited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: i32,
    pub asset_id: Option<i32>,
    pub action: AuditAction,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Option<i32>,
}

/// Audit log row with the asset and actor names resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLogEntry {
    pub id: i32,
    pub asset_id: Option<i32>,
    pub asset_name: Option<String>,
    pub action: AuditAction,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Option<i32>,
    pub actor_name: Option<String>,
}

impl AuditLogEntry {
    pub fn action_label(&self) -> &'static str {
        self.action.label()
    }
}

/// Entry to append
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub asset_id: Option<i32>,
    pub action: AuditAction,
    pub description: String,
    pub actor_id: Option<i32>,
}

impl NewAuditLog {
    pub fn new(asset_id: i32, action: AuditAction, description: String, actor_id: Option<i32>) -> Self {
        Self {
            asset_id: Some(asset_id),
            action,
            description,
            actor_id,
        }
    }
}

/// Query parameters for audit log listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AuditLogQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}

/// One page of audit entries
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditLogPage {
    pub items: Vec<AuditLogEntry>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
