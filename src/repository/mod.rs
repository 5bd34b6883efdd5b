//! Repository layer for database operations
//!
//! Reads go through the pool. Writes that take part in a lifecycle
//! transition take a connection so the caller can group them in one
//! transaction.

pub mod actors;
pub mod assets;
pub mod audit_logs;
pub mod maintenance;
pub mod reservations;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub reservations: reservations::ReservationsRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub audit_logs: audit_logs::AuditLogsRepository,
    pub actors: actors::ActorsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            audit_logs: audit_logs::AuditLogsRepository::new(pool.clone()),
            actors: actors::ActorsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
