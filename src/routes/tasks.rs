use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::dto::TaskDto;
use crate::error::AppError;
use crate::models::Status;
use crate::response::Envelope;
use crate::service::tasks;
use crate::state::SharedState;

pub async fn read_all(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<TaskDto>>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    let list = tasks::list_all(&state.pool).await?;
    Ok(Json(Envelope::new("Successfully retrieved all tasks", list)))
}

pub async fn read_by_id(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<TaskDto>>, AppError> {
    auth.require_any_role(&["Manager", "Employee"])?;

    let task = tasks::find_by_id(&state.pool, id).await?;
    Ok(Json(Envelope::new("Successfully retrieved task", task)))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<tasks::CreateTask>,
) -> Result<Json<Envelope<TaskDto>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    let task = tasks::create(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Successfully created task", task)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<tasks::UpdateTask>,
) -> Result<Json<Envelope<TaskDto>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    let task = tasks::update(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Successfully updated task", task)))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    tasks::delete(&state.pool, auth.actor(), id).await?;
    Ok(Json(Envelope::message("Successfully deleted task")))
}

/// Every task under any project managed by the caller.
pub async fn read_all_by_project_manager(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<TaskDto>>>, AppError> {
    auth.require_any_role(&["Manager"])?;

    let list = tasks::list_by_project_manager(&state.pool, auth.user_id).await?;
    Ok(Json(Envelope::new(
        "Successfully retrieved tasks by project manager",
        list,
    )))
}

/// The caller's unfinished tasks (anything other than COMPLETE).
pub async fn employee_read_open(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<TaskDto>>>, AppError> {
    auth.require_any_role(&["Employee"])?;

    let list = tasks::list_by_current_employee_excluding_status(
        &state.pool,
        auth.user_id,
        Status::Complete,
    )
    .await?;
    Ok(Json(Envelope::new(
        "Successfully retrieved non-completed tasks",
        list,
    )))
}

pub async fn employee_read_completed(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<TaskDto>>>, AppError> {
    auth.require_any_role(&["Employee"])?;

    let list =
        tasks::list_by_current_employee_by_status(&state.pool, auth.user_id, Status::Complete)
            .await?;
    Ok(Json(Envelope::new(
        "Successfully retrieved completed tasks",
        list,
    )))
}

pub async fn employee_update_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<tasks::UpdateTaskStatus>,
) -> Result<Json<Envelope<TaskDto>>, AppError> {
    auth.require_any_role(&["Employee"])?;

    let task = tasks::update_status(&state.pool, auth.actor(), req).await?;
    Ok(Json(Envelope::new("Successfully updated task status", task)))
}
