//! Actors repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::actor::{Actor, CreateActor},
};

#[derive(Clone)]
pub struct ActorsRepository {
    pool: Pool<Postgres>,
}

impl ActorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Actor>> {
        let rows = sqlx::query_as::<_, Actor>("SELECT * FROM actors ORDER BY username")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Actor> {
        sqlx::query_as::<_, Actor>("SELECT * FROM actors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor {} not found", id)))
    }

    pub async fn create(&self, data: &CreateActor) -> AppResult<Actor> {
        sqlx::query_as::<_, Actor>(
            "INSERT INTO actors (username, display_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.username.trim())
        .bind(&data.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "actors_username_key") {
                AppError::Conflict(format!("Username '{}' is already taken", data.username.trim()))
            } else {
                AppError::Database(e)
            }
        })
    }

    /// Delete an actor. Audit entries keep existing with no actor.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Actor {} not found", id)));
        }
        Ok(())
    }
}
