//! Reservations repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{NewReservation, Reservation, ReservationDetails},
    },
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List reservations, latest check-in first
    pub async fn list(&self) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT r.id, r.holder_name, r.asset_id, a.name AS asset_name,
                   r.check_in, r.check_out, r.days, r.status
            FROM reservations r
            JOIN assets a ON a.id = r.asset_id
            ORDER BY r.check_in DESC, r.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get reservation by ID and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Insert a booked reservation
    pub async fn create(&self, conn: &mut PgConnection, data: &NewReservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (holder_name, asset_id, check_in, check_out, days, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.holder_name)
        .bind(data.asset_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.days)
        .bind(ReservationStatus::Booked)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Set the status of a reservation
    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("UPDATE reservations SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }
}
