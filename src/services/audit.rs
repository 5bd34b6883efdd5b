//! Audit log listing and exports

use crate::{
    config::ReportsConfig,
    error::AppResult,
    models::audit_log::{AuditLogPage, AuditLogQuery},
    reports::{audit_csv, audit_pdf},
    repository::Repository,
};

const DEFAULT_PER_PAGE: i64 = 50;
const MAX_PER_PAGE: i64 = 500;
/// Pages past this are empty for any realistic log; keeps OFFSET in range
const MAX_PAGE: i64 = 1_000_000;

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
    reports: ReportsConfig,
}

impl AuditService {
    pub fn new(repository: Repository, reports: ReportsConfig) -> Self {
        Self { repository, reports }
    }

    /// One page of entries, newest first
    pub async fn list(&self, query: &AuditLogQuery) -> AppResult<AuditLogPage> {
        let (page, per_page) = page_bounds(query);
        let (items, total) = self.repository.audit_logs.list(page, per_page).await?;
        Ok(AuditLogPage {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Whole log as CSV, newest first
    pub async fn export_csv(&self) -> AppResult<Vec<u8>> {
        let entries = self.repository.audit_logs.all().await?;
        tracing::info!("Exporting {} audit entries as CSV", entries.len());
        audit_csv::render(&entries)
    }

    /// Whole log as a paginated PDF, newest first
    pub async fn export_pdf(&self) -> AppResult<Vec<u8>> {
        let entries = self.repository.audit_logs.all().await?;
        tracing::info!("Exporting {} audit entries as PDF", entries.len());
        audit_pdf::render(&self.reports.pdf_title, &entries)
    }
}

fn page_bounds(query: &AuditLogQuery) -> (i64, i64) {
    let page = query.page.unwrap_or(1).clamp(1, MAX_PAGE);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    (page, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_defaults() {
        assert_eq!(page_bounds(&AuditLogQuery::default()), (1, DEFAULT_PER_PAGE));
    }

    #[test]
    fn test_page_bounds_are_clamped() {
        let query = AuditLogQuery {
            page: Some(0),
            per_page: Some(10_000),
        };
        assert_eq!(page_bounds(&query), (1, MAX_PER_PAGE));

        let query = AuditLogQuery {
            page: Some(3),
            per_page: Some(-5),
        };
        assert_eq!(page_bounds(&query), (3, 1));

        let query = AuditLogQuery {
            page: Some(i64::MAX),
            per_page: Some(i64::MAX),
        };
        let (page, per_page) = page_bounds(&query);
        assert_eq!((page, per_page), (MAX_PAGE, MAX_PER_PAGE));
        assert!((page - 1).checked_mul(per_page).is_some());
    }
}
