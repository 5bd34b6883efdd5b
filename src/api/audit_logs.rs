//! Audit log endpoints and report downloads

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::audit_log::{AuditLogPage, AuditLogQuery},
    reports::{audit_csv, audit_pdf},
};

/// List audit entries, newest first
#[utoipa::path(
    get,
    path = "/audit-logs",
    tag = "audit",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "One page of audit entries", body = AuditLogPage)
    )
)]
pub async fn list_audit_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<AuditLogQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let page = state.services.audit.list(&query).await?;
    Ok(Json(page))
}

/// Download the whole audit log as CSV
#[utoipa::path(
    get,
    path = "/audit-logs/export/csv",
    tag = "audit",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String)
    )
)]
pub async fn export_csv(State(state): State<crate::AppState>) -> AppResult<Response> {
    let body = state.services.audit.export_csv().await?;
    Ok(attachment(audit_csv::CONTENT_TYPE, audit_csv::FILE_NAME, body))
}

/// Download the whole audit log as a PDF checkpoint report
#[utoipa::path(
    get,
    path = "/audit-logs/export/pdf",
    tag = "audit",
    responses(
        (status = 200, description = "PDF attachment", content_type = "application/pdf", body = Vec<u8>)
    )
)]
pub async fn export_pdf(State(state): State<crate::AppState>) -> AppResult<Response> {
    let body = state.services.audit.export_pdf().await?;
    Ok(attachment(audit_pdf::CONTENT_TYPE, audit_pdf::FILE_NAME, body))
}

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
