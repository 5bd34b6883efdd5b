//! Audit log repository. Append and read only.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::audit_log::{AuditLog, AuditLogEntry, NewAuditLog},
};

const ENTRY_SELECT: &str = r#"
    SELECT l.id, l.asset_id, a.name AS asset_name, l.action, l.description,
           l.timestamp, l.actor_id,
           COALESCE(ac.display_name, ac.username) AS actor_name
    FROM audit_logs l
    LEFT JOIN assets a ON a.id = l.asset_id
    LEFT JOIN actors ac ON ac.id = l.actor_id
    ORDER BY l.timestamp DESC, l.id DESC
"#;

#[derive(Clone)]
pub struct AuditLogsRepository {
    pool: Pool<Postgres>,
}

impl AuditLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an entry; the timestamp is set by the database
    pub async fn append(&self, conn: &mut PgConnection, entry: &NewAuditLog) -> AppResult<AuditLog> {
        let row = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (asset_id, action, description, actor_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.asset_id)
        .bind(entry.action)
        .bind(&entry.description)
        .bind(entry.actor_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// One page of entries, newest first, with the total count
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<AuditLogEntry>, i64)> {
        let offset = page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(per_page))
            .filter(|o| *o >= 0)
            .ok_or_else(|| AppError::BadRequest("Page out of range".to_string()))?;

        let total = self.count().await?;

        let query = format!("{} LIMIT $1 OFFSET $2", ENTRY_SELECT);
        let rows = sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Every entry, newest first
    pub async fn all(&self) -> AppResult<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditLogEntry>(ENTRY_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Count entries
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
