//! Assets repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        asset::{Asset, AssetQuery, CreateAsset},
        enums::AssetStatus,
    },
};

const SERIAL_CONSTRAINT: &str = "assets_serial_number_key";

pub const DUPLICATE_SERIAL_MESSAGE: &str = "Asset with this serial number already exists.";

fn map_serial_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, SERIAL_CONSTRAINT) {
        AppError::DuplicateSerial(DUPLICATE_SERIAL_MESSAGE.to_string())
    } else {
        AppError::Database(err)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assets ordered by name, optionally filtered by status
    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let rows = match query.status {
            Some(status) => {
                sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE status = $1 ORDER BY name, id")
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Asset>("SELECT * FROM assets ORDER BY name, id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Get asset by ID and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Whether another asset already uses this serial number
    pub async fn serial_exists(&self, serial_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE serial_number = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(serial_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert an asset
    pub async fn create(&self, conn: &mut PgConnection, data: &CreateAsset) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (name, serial_number, category, location, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.serial_number.trim())
        .bind(non_blank(&data.category))
        .bind(non_blank(&data.location))
        .bind(AssetStatus::Available)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_serial_conflict)
    }

    /// Write every editable field of an asset
    pub async fn save(&self, conn: &mut PgConnection, asset: &Asset) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET name = $1, serial_number = $2, category = $3, location = $4,
                image = $5, status = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&asset.name)
        .bind(&asset.serial_number)
        .bind(&asset.category)
        .bind(&asset.location)
        .bind(&asset.image)
        .bind(asset.status)
        .bind(asset.id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_serial_conflict)?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset.id)))
    }

    /// Set the status of an asset
    pub async fn set_status(&self, conn: &mut PgConnection, id: i32, status: AssetStatus) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("UPDATE assets SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Record the identifier image reference (and nothing else)
    pub async fn set_qr_code(&self, id: i32, reference: &str) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("UPDATE assets SET qr_code = $1 WHERE id = $2 RETURNING *")
            .bind(reference)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Delete an asset (its reservations and maintenance records go with it)
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Count all assets
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count assets in the given status
    pub async fn count_with_status(&self, status: AssetStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Most recently created assets
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
