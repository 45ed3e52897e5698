use axum::extract::{Path, State};
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::dto::UserDto;
use crate::error::AppError;
use crate::response::Envelope;
use crate::service::users;
use crate::state::SharedState;

pub async fn read_all(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<UserDto>>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let list = users::list_all(&state.pool).await?;
    Ok(Json(Envelope::new("Successfully retrieved all users", list)))
}

pub async fn read_by_username(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<UserDto>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let user = users::find_by_username(&state.pool, &username).await?;
    Ok(Json(Envelope::new("Successfully retrieved user", user)))
}

pub async fn read_all_by_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(role): Path<String>,
) -> Result<Json<Envelope<Vec<UserDto>>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let list = users::list_by_role(&state.pool, &role).await?;
    Ok(Json(Envelope::new("Successfully retrieved users by role", list)))
}

/// Administrator-created accounts are enabled immediately; there is no
/// confirmation round-trip.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<users::CreateUser>,
) -> Result<Json<Envelope<UserDto>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let user = users::create(&state.pool, auth.actor(), req, true).await?;
    Ok(Json(Envelope::new("Successfully created user", user)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<users::UpdateUser>,
) -> Result<Json<Envelope<UserDto>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let user = users::update(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Successfully updated user", user)))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    users::delete(&state.pool, auth.actor(), &username).await?;
    Ok(Json(Envelope::message("Successfully deleted user")))
}

pub async fn purge(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    users::purge(&state.pool, &username).await?;
    Ok(Json(Envelope::message("User is permanently removed")))
}
