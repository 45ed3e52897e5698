use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::dto::TaskDto;
use crate::error::AppError;
use crate::models::Status;

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub project_id: Uuid,
    pub assignee_id: Uuid,
    pub subject: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub assignee_id: Uuid,
    pub subject: String,
    #[serde(default)]
    pub detail: String,
    pub status: Status,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatus {
    pub id: Uuid,
    pub status: Status,
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<TaskDto, AppError> {
    let task = db::tasks::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task does not exist".to_string()))?;
    Ok(task.into())
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<TaskDto>, AppError> {
    let tasks = db::tasks::list_all(pool).await?;
    Ok(tasks.into_iter().map(TaskDto::from).collect())
}

/// Status and assigned date are forced on creation; caller input for either
/// is ignored.
pub async fn create(pool: &PgPool, actor: Uuid, req: CreateTask) -> Result<TaskDto, AppError> {
    if db::projects::find_by_id(pool, req.project_id).await?.is_none() {
        return Err(AppError::BadRequest("Project does not exist".to_string()));
    }
    if db::users::find_by_id(pool, req.assignee_id).await?.is_none() {
        return Err(AppError::BadRequest(
            "Assigned employee does not exist".to_string(),
        ));
    }

    let task = db::tasks::create(
        pool,
        actor,
        req.project_id,
        req.assignee_id,
        &req.subject,
        &req.detail,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(task.into())
}

pub async fn update(pool: &PgPool, actor: Uuid, req: UpdateTask) -> Result<TaskDto, AppError> {
    db::tasks::find_by_id(pool, req.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task does not exist".to_string()))?;

    let task = db::tasks::update(
        pool,
        actor,
        req.id,
        req.project_id,
        req.assignee_id,
        &req.subject,
        &req.detail,
        req.status,
    )
    .await?;

    Ok(task.into())
}

/// Partial update: only the status changes. Any status value is accepted;
/// employee-driven transitions are deliberately unconstrained.
pub async fn update_status(
    pool: &PgPool,
    actor: Uuid,
    req: UpdateTaskStatus,
) -> Result<TaskDto, AppError> {
    db::tasks::find_by_id(pool, req.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task does not exist".to_string()))?;

    let task = db::tasks::set_status(pool, actor, req.id, req.status).await?;
    Ok(task.into())
}

pub async fn delete(pool: &PgPool, actor: Uuid, id: Uuid) -> Result<(), AppError> {
    db::tasks::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task does not exist".to_string()))?;

    db::tasks::soft_delete(pool, actor, id).await?;
    Ok(())
}

/// Best-effort cascade: each active task is soft-deleted individually and
/// per-item failures are logged and swallowed, so a partial cascade is
/// possible. Only a failure to enumerate the tasks propagates.
pub async fn delete_by_project(pool: &PgPool, actor: Uuid, project_id: Uuid) -> Result<(), AppError> {
    let tasks = db::tasks::list_by_project(pool, project_id).await?;

    for task in tasks {
        if let Err(e) = db::tasks::soft_delete(pool, actor, task.id).await {
            tracing::warn!("Failed to cascade-delete task {}: {e}", task.id);
        }
    }

    Ok(())
}

pub async fn list_by_current_employee_excluding_status(
    pool: &PgPool,
    employee_id: Uuid,
    status: Status,
) -> Result<Vec<TaskDto>, AppError> {
    let user = db::users::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let tasks = db::tasks::list_by_assignee_excluding_status(pool, user.id, status).await?;
    Ok(tasks.into_iter().map(TaskDto::from).collect())
}

pub async fn list_by_current_employee_by_status(
    pool: &PgPool,
    employee_id: Uuid,
    status: Status,
) -> Result<Vec<TaskDto>, AppError> {
    let user = db::users::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let tasks = db::tasks::list_by_assignee_and_status(pool, user.id, status).await?;
    Ok(tasks.into_iter().map(TaskDto::from).collect())
}

pub async fn list_by_project_manager(
    pool: &PgPool,
    manager_id: Uuid,
) -> Result<Vec<TaskDto>, AppError> {
    let user = db::users::find_by_id(pool, manager_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let tasks = db::tasks::list_by_project_manager(pool, user.id).await?;
    Ok(tasks.into_iter().map(TaskDto::from).collect())
}

pub async fn count_completed(pool: &PgPool, code: &str) -> Result<i64, AppError> {
    Ok(db::tasks::count_by_code_and_status(pool, code, Status::Complete).await?)
}

pub async fn count_non_completed(pool: &PgPool, code: &str) -> Result<i64, AppError> {
    Ok(db::tasks::count_by_code_excluding_status(pool, code, Status::Complete).await?)
}
