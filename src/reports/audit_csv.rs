//! CSV rendering of the audit log

use crate::{
    error::{AppError, AppResult},
    models::audit_log::AuditLogEntry,
};

pub const CONTENT_TYPE: &str = "text/csv";
pub const FILE_NAME: &str = "audit_log.csv";

const HEADER: [&str; 5] = ["Asset", "Action", "Description", "User", "Timestamp"];

/// Render entries, in the given order, as CSV with a header row
pub fn render(entries: &[AuditLogEntry]) -> AppResult<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADER).map_err(csv_error)?;
    for entry in entries {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string();
        writer
            .write_record([
                entry.asset_name.as_deref().unwrap_or(""),
                entry.action_label(),
                entry.description.as_str(),
                entry.actor_name.as_deref().unwrap_or(""),
                timestamp.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Render(format!("CSV flush failed: {}", e)))
}

fn csv_error(e: ::csv::Error) -> AppError {
    AppError::Render(format!("CSV write failed: {}", e))
}
