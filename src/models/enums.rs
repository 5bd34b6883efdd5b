//! Shared domain enums, stored as native Postgres enum types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Current availability of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "asset_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    Available,
    Unavailable,
    CheckedOut,
    Maintenance,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::Unavailable => "unavailable",
            AssetStatus::CheckedOut => "checked_out",
            AssetStatus::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetStatus::Available => "Available",
            AssetStatus::Unavailable => "Unavailable",
            AssetStatus::CheckedOut => "Checked Out",
            AssetStatus::Maintenance => "Maintenance",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Booked,
    CheckedOut,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Booked => "Booked",
            ReservationStatus::CheckedOut => "Checked Out",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// MaintenanceStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    InProgress,
    Done,
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MaintenanceStatus::InProgress => "In Progress",
            MaintenanceStatus::Done => "Done",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of lifecycle-affecting action recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    CheckedOut,
    Returned,
    StatusChanged,
    MaintenanceCreated,
    MaintenanceCompleted,
}

impl AuditAction {
    /// Human-readable label used in listings and exports
    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::Created => "Asset Created",
            AuditAction::Updated => "Asset Updated",
            AuditAction::CheckedOut => "Checked Out",
            AuditAction::Returned => "Returned",
            AuditAction::StatusChanged => "Status Changed",
            AuditAction::MaintenanceCreated => "Maintenance Created",
            AuditAction::MaintenanceCompleted => "Maintenance Completed",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
