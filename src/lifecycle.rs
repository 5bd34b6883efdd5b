//! Asset lifecycle transitions
//!
//! Reservations and maintenance records drive the status of the asset they
//! reference. Each transition has a fixed target status; whether it is
//! allowed from the current state depends on the configured policy.

use crate::{
    config::LifecycleConfig,
    error::{AppError, AppResult},
    models::enums::{AssetStatus, MaintenanceStatus, ReservationStatus},
};

/// A status-affecting action on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A reservation is booked
    Reserve,
    /// A booked reservation is handed back
    Return,
    /// A maintenance window is opened
    BeginMaintenance,
    /// A maintenance window is closed
    CompleteMaintenance,
}

impl Transition {
    /// Asset status after the transition
    pub fn target(self) -> AssetStatus {
        match self {
            Transition::Reserve => AssetStatus::Unavailable,
            Transition::Return => AssetStatus::Available,
            Transition::BeginMaintenance => AssetStatus::Maintenance,
            Transition::CompleteMaintenance => AssetStatus::Available,
        }
    }
}

/// Asset status implied by a maintenance record's status
pub fn status_for_maintenance(status: MaintenanceStatus) -> AssetStatus {
    match status {
        MaintenanceStatus::InProgress => Transition::BeginMaintenance.target(),
        MaintenanceStatus::Done => Transition::CompleteMaintenance.target(),
    }
}

/// Transition rules in effect
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecyclePolicy {
    reject_conflicts: bool,
}

impl From<LifecycleConfig> for LifecyclePolicy {
    fn from(config: LifecycleConfig) -> Self {
        Self {
            reject_conflicts: config.reject_conflicts,
        }
    }
}

impl LifecyclePolicy {
    /// Policy applying every transition unconditionally (last write wins)
    pub fn permissive() -> Self {
        Self { reject_conflicts: false }
    }

    /// Policy refusing overlapping reservations and maintenance windows
    pub fn strict() -> Self {
        Self { reject_conflicts: true }
    }

    pub fn rejects_conflicts(&self) -> bool {
        self.reject_conflicts
    }

    /// Check a transition against the asset's current status and return
    /// the status the asset must be moved to.
    pub fn asset_transition(&self, current: AssetStatus, transition: Transition) -> AppResult<AssetStatus> {
        if self.reject_conflicts {
            match transition {
                Transition::Reserve | Transition::BeginMaintenance
                    if current != AssetStatus::Available =>
                {
                    return Err(AppError::LifecycleConflict(format!(
                        "Asset is {}, not available",
                        current.as_str()
                    )));
                }
                _ => {}
            }
        }
        Ok(transition.target())
    }

    /// Check that a reservation may be handed back
    pub fn reservation_return(&self, current: ReservationStatus) -> AppResult<ReservationStatus> {
        if self.reject_conflicts && current != ReservationStatus::Booked {
            return Err(AppError::LifecycleConflict(
                "Reservation has already been checked out".to_string(),
            ));
        }
        Ok(ReservationStatus::CheckedOut)
    }

    /// Check that a maintenance record may be completed
    pub fn maintenance_completion(&self, current: MaintenanceStatus) -> AppResult<MaintenanceStatus> {
        if self.reject_conflicts && current != MaintenanceStatus::InProgress {
            return Err(AppError::LifecycleConflict(
                "Maintenance is already completed".to_string(),
            ));
        }
        Ok(MaintenanceStatus::Done)
    }
}
