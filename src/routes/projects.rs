use axum::extract::{Path, State};
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::dto::ProjectDto;
use crate::error::AppError;
use crate::response::Envelope;
use crate::service::projects;
use crate::state::SharedState;

pub async fn read_all(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<ProjectDto>>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    let list = projects::list_active(&state.pool).await?;
    Ok(Json(Envelope::new("Projects are retrieved", list)))
}

pub async fn read_by_code(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<Envelope<ProjectDto>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    let project = projects::get_by_code(&state.pool, &code).await?;
    Ok(Json(Envelope::new("Project is retrieved", project)))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<projects::CreateProject>,
) -> Result<Json<Envelope<ProjectDto>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    let project = projects::create(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Project is successfully created", project)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<projects::UpdateProject>,
) -> Result<Json<Envelope<ProjectDto>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    let project = projects::update(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Project is successfully updated", project)))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    projects::delete(&state.pool, auth.actor(), &code).await?;
    Ok(Json(Envelope::message("Project is successfully deleted")))
}

pub async fn complete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<Envelope<ProjectDto>>, AppError> {
    auth.require_any_role(&["Admin", "Manager"])?;

    let project = projects::complete(&state.pool, auth.actor(), &code).await?;
    Ok(Json(Envelope::new("Project is successfully completed", project)))
}

/// The caller's own projects enriched with live task counts.
pub async fn manager_details(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<ProjectDto>>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    let details = projects::details_for_current_manager(&state.pool, auth.user_id).await?;
    Ok(Json(Envelope::new("Project details are retrieved", details)))
}
