//! Maintenance repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::MaintenanceStatus,
        maintenance::{Maintenance, MaintenanceDetails, NewMaintenance},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT m.id, m.asset_id, a.name AS asset_name, m.start_date, m.end_date,
           m.hours, m.cost, m.status, m.notes
    FROM maintenance m
    JOIN assets a ON a.id = m.asset_id
    ORDER BY m.start_date DESC, m.id DESC
"#;

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List maintenance records, latest start first
    pub async fn list(&self) -> AppResult<Vec<MaintenanceDetails>> {
        let rows = sqlx::query_as::<_, MaintenanceDetails>(DETAILS_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Latest maintenance records (for the dashboard)
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<MaintenanceDetails>> {
        let query = format!("{} LIMIT $1", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, MaintenanceDetails>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get maintenance record by ID and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenance WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance {} not found", id)))
    }

    /// Insert an in-progress maintenance record
    pub async fn create(&self, conn: &mut PgConnection, data: &NewMaintenance) -> AppResult<Maintenance> {
        let row = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenance (asset_id, start_date, end_date, hours, cost, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.hours)
        .bind(data.cost)
        .bind(MaintenanceStatus::InProgress)
        .bind(&data.notes)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Set the status of a maintenance record
    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: MaintenanceStatus,
    ) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>("UPDATE maintenance SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance {} not found", id)))
    }
}
