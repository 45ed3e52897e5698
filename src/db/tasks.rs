use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Status, Task};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND is_deleted = false")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE is_deleted = false ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE project_id = $1 AND is_deleted = false ORDER BY created_at",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_assignee(pool: &PgPool, assignee_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE assignee_id = $1 AND is_deleted = false ORDER BY created_at",
    )
    .bind(assignee_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_assignee_and_status(
    pool: &PgPool,
    assignee_id: Uuid,
    status: Status,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks
         WHERE assignee_id = $1 AND status = $2 AND is_deleted = false
         ORDER BY created_at",
    )
    .bind(assignee_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn list_by_assignee_excluding_status(
    pool: &PgPool,
    assignee_id: Uuid,
    status: Status,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks
         WHERE assignee_id = $1 AND status <> $2 AND is_deleted = false
         ORDER BY created_at",
    )
    .bind(assignee_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

/// Every active task under any active project managed by the given user.
pub async fn list_by_project_manager(
    pool: &PgPool,
    manager_id: Uuid,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT t.* FROM tasks t
         JOIN projects p ON t.project_id = p.id
         WHERE p.manager_id = $1 AND p.is_deleted = false AND t.is_deleted = false
         ORDER BY t.created_at",
    )
    .bind(manager_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    assignee_id: Uuid,
    subject: &str,
    detail: &str,
    assigned_date: NaiveDate,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (project_id, assignee_id, subject, detail, status, assigned_date, created_by, updated_by)
         VALUES ($1, $2, $3, $4, 'OPEN', $5, $6, $6) RETURNING *",
    )
    .bind(project_id)
    .bind(assignee_id)
    .bind(subject)
    .bind(detail)
    .bind(assigned_date)
    .bind(actor)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    project_id: Uuid,
    assignee_id: Uuid,
    subject: &str,
    detail: &str,
    status: Status,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET project_id = $3, assignee_id = $4, subject = $5, detail = $6, status = $7,
             updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false
         RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(project_id)
    .bind(assignee_id)
    .bind(subject)
    .bind(detail)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    status: Status,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET status = $3, updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, actor: Uuid, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tasks SET is_deleted = true, updated_at = now(), updated_by = $2 WHERE id = $1",
    )
    .bind(id)
    .bind(actor)
    .execute(pool)
    .await?;
    Ok(())
}

/// Live aggregate feeding project detail enrichment; scoped by project code
/// so counts follow the code even across manager reassignment.
pub async fn count_by_code_and_status(
    pool: &PgPool,
    code: &str,
    status: Status,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM tasks t
         JOIN projects p ON t.project_id = p.id
         WHERE p.project_code = $1 AND t.status = $2 AND t.is_deleted = false",
    )
    .bind(code)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn count_by_code_excluding_status(
    pool: &PgPool,
    code: &str,
    status: Status,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM tasks t
         JOIN projects p ON t.project_id = p.id
         WHERE p.project_code = $1 AND t.status <> $2 AND t.is_deleted = false",
    )
    .bind(code)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
