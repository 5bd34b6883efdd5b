//! API handlers for the asset tracker REST endpoints

pub mod actors;
pub mod assets;
pub mod audit_logs;
pub mod dashboard;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod reservations;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName},
};
use crate::{error::AppError, AppState};

/// Header naming the actor a write is attributed to
pub static ACTOR_HEADER: HeaderName = HeaderName::from_static("x-actor-id");

/// Extractor for the optional acting actor.
///
/// Absent header means an anonymous write. A value that is not an integer is
/// rejected with 400, an id with no matching actor with 404.
pub struct ActingActor(pub Option<i32>);

#[async_trait]
impl FromRequestParts<AppState> for ActingActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(&ACTOR_HEADER) else {
            return Ok(ActingActor(None));
        };

        let id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i32>().ok())
            .ok_or_else(|| AppError::BadRequest("Invalid X-Actor-Id header".to_string()))?;

        let actor = state.services.actors.get_by_id(id).await?;
        Ok(ActingActor(Some(actor.id)))
    }
}
