use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Project, Status};

pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE project_code = $1 AND is_deleted = false",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1 AND is_deleted = false")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE is_deleted = false ORDER BY project_code",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_manager(pool: &PgPool, manager_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE manager_id = $1 AND is_deleted = false
         ORDER BY project_code",
    )
    .bind(manager_id)
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    code: &str,
    name: &str,
    detail: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    manager_id: Uuid,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (project_code, name, detail, status, start_date, end_date, manager_id, created_by, updated_by)
         VALUES ($1, $2, $3, 'OPEN', $4, $5, $6, $7, $7) RETURNING *",
    )
    .bind(code)
    .bind(name)
    .bind(detail)
    .bind(start_date)
    .bind(end_date)
    .bind(manager_id)
    .bind(actor)
    .fetch_one(pool)
    .await
}

/// Updates everything except status and code; status only moves through
/// the complete operation.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    name: &str,
    detail: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    manager_id: Uuid,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET name = $3, detail = $4, start_date = $5, end_date = $6, manager_id = $7,
             updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false
         RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(name)
    .bind(detail)
    .bind(start_date)
    .bind(end_date)
    .bind(manager_id)
    .fetch_one(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    status: Status,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET status = $3, updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(status)
    .fetch_one(pool)
    .await
}

/// Soft-delete, renaming the code to free it for reuse.
pub async fn rename_and_soft_delete(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    new_code: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE projects SET project_code = $3, is_deleted = true, updated_at = now(), updated_by = $2
         WHERE id = $1",
    )
    .bind(id)
    .bind(actor)
    .bind(new_code)
    .execute(pool)
    .await?;
    Ok(())
}
