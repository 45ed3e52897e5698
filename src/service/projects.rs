use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::dto::ProjectDto;
use crate::error::AppError;
use crate::models::Status;
use crate::service::tasks;

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub project_code: String,
    pub name: String,
    #[serde(default)]
    pub detail: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub project_code: String,
    pub name: String,
    #[serde(default)]
    pub detail: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Uuid,
}

pub async fn get_by_code(pool: &PgPool, code: &str) -> Result<ProjectDto, AppError> {
    let project = db::projects::find_by_code(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(project.into())
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<ProjectDto>, AppError> {
    let projects = db::projects::list_active(pool).await?;
    Ok(projects.into_iter().map(ProjectDto::from).collect())
}

pub async fn create(pool: &PgPool, actor: Uuid, req: CreateProject) -> Result<ProjectDto, AppError> {
    if db::projects::find_by_code(pool, &req.project_code)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Project with this code already exists".to_string(),
        ));
    }

    if db::users::find_by_id(pool, req.manager_id).await?.is_none() {
        return Err(AppError::BadRequest(
            "Assigned manager does not exist".to_string(),
        ));
    }

    // Initial status is always OPEN regardless of caller input.
    let project = db::projects::create(
        pool,
        actor,
        &req.project_code,
        &req.name,
        &req.detail,
        req.start_date,
        req.end_date,
        req.manager_id,
    )
    .await?;

    Ok(project.into())
}

pub async fn update(pool: &PgPool, actor: Uuid, req: UpdateProject) -> Result<ProjectDto, AppError> {
    let existing = db::projects::find_by_code(pool, &req.project_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    if db::users::find_by_id(pool, req.manager_id).await?.is_none() {
        return Err(AppError::BadRequest(
            "Assigned manager does not exist".to_string(),
        ));
    }

    let project = db::projects::update(
        pool,
        actor,
        existing.id,
        &req.name,
        &req.detail,
        req.start_date,
        req.end_date,
        req.manager_id,
    )
    .await?;

    Ok(project.into())
}

/// Soft-deletes the project, renames its code to `{code}-{id}` so the code
/// becomes reusable, and cascades a soft-delete over its active tasks.
pub async fn delete(pool: &PgPool, actor: Uuid, code: &str) -> Result<(), AppError> {
    let project = db::projects::find_by_code(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let new_code = format!("{}-{}", project.project_code, project.id);
    db::projects::rename_and_soft_delete(pool, actor, project.id, &new_code).await?;

    tasks::delete_by_project(pool, actor, project.id).await?;

    Ok(())
}

pub async fn complete(pool: &PgPool, actor: Uuid, code: &str) -> Result<ProjectDto, AppError> {
    let project = db::projects::find_by_code(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    if project.status == Status::Complete {
        return Err(AppError::Conflict(
            "Project is already completed".to_string(),
        ));
    }

    let project = db::projects::set_status(pool, actor, project.id, Status::Complete).await?;
    Ok(project.into())
}

pub async fn list_by_manager(pool: &PgPool, manager_id: Uuid) -> Result<Vec<ProjectDto>, AppError> {
    let projects = db::projects::list_by_manager(pool, manager_id).await?;
    Ok(projects.into_iter().map(ProjectDto::from).collect())
}

/// The caller's projects, each enriched with live task counts. The counts
/// are aggregate queries per project, never cached.
pub async fn details_for_current_manager(
    pool: &PgPool,
    manager_id: Uuid,
) -> Result<Vec<ProjectDto>, AppError> {
    let user = db::users::find_by_id(pool, manager_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let projects = db::projects::list_by_manager(pool, user.id).await?;
    if projects.is_empty() {
        return Err(AppError::NotFound(
            "No projects assigned to this manager".to_string(),
        ));
    }

    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        let complete = tasks::count_completed(pool, &project.project_code).await?;
        let unfinished = tasks::count_non_completed(pool, &project.project_code).await?;

        let mut dto = ProjectDto::from(project);
        dto.complete_task_counts = Some(complete);
        dto.unfinished_task_counts = Some(unfinished);
        details.push(dto);
    }

    Ok(details)
}
