//! Data models for Asset Tracker

pub mod actor;
pub mod asset;
pub mod audit_log;
pub mod enums;
pub mod maintenance;
pub mod reservation;

// Re-export commonly used types
pub use actor::Actor;
pub use asset::Asset;
pub use audit_log::{AuditLog, AuditLogEntry};
pub use enums::{AssetStatus, AuditAction, MaintenanceStatus, ReservationStatus};
pub use maintenance::{Maintenance, MaintenanceDetails};
pub use reservation::{Reservation, ReservationDetails};
