//! Actor endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::actor::{Actor, CreateActor},
};

/// List actors
#[utoipa::path(
    get,
    path = "/actors",
    tag = "actors",
    responses(
        (status = 200, description = "Actor list", body = Vec<Actor>)
    )
)]
pub async fn list_actors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Actor>>> {
    let actors = state.services.actors.list().await?;
    Ok(Json(actors))
}

/// Register an actor that writes can be attributed to
#[utoipa::path(
    post,
    path = "/actors",
    tag = "actors",
    request_body = CreateActor,
    responses(
        (status = 201, description = "Actor created", body = Actor),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_actor(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateActor>,
) -> AppResult<(StatusCode, Json<Actor>)> {
    let actor = state.services.actors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

/// Delete an actor; their audit entries are kept without attribution
#[utoipa::path(
    delete,
    path = "/actors/{id}",
    tag = "actors",
    params(("id" = i32, Path, description = "Actor ID")),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 404, description = "Actor not found")
    )
)]
pub async fn delete_actor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.actors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
