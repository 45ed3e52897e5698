use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Gender, User};

#[allow(clippy::too_many_arguments)]
pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    actor: Uuid,
    username: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    gender: Gender,
    role_id: Uuid,
    enabled: bool,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, first_name, last_name, phone, gender, role_id, enabled, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING *",
    )
    .bind(username)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(phone)
    .bind(gender)
    .bind(role_id)
    .bind(enabled)
    .bind(actor)
    .fetch_one(executor)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 AND is_deleted = false")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_deleted = false")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE is_deleted = false ORDER BY first_name")
        .fetch_all(pool)
        .await
}

pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u
         JOIN roles r ON u.role_id = r.id
         WHERE LOWER(r.name) = LOWER($1) AND u.is_deleted = false
         ORDER BY u.first_name",
    )
    .bind(role)
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    gender: Gender,
    role_id: Uuid,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET password_hash = $3, first_name = $4, last_name = $5, phone = $6,
             gender = $7, role_id = $8, enabled = true,
             updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false
         RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(phone)
    .bind(gender)
    .bind(role_id)
    .fetch_one(pool)
    .await
}

pub async fn set_enabled(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    enabled: bool,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET enabled = $3, updated_at = now(), updated_by = $2
         WHERE id = $1 AND is_deleted = false RETURNING *",
    )
    .bind(id)
    .bind(actor)
    .bind(enabled)
    .fetch_one(pool)
    .await
}

/// Soft-delete, renaming the username to free it for reuse.
pub async fn rename_and_soft_delete(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    new_username: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET username = $3, is_deleted = true, updated_at = now(), updated_by = $2
         WHERE id = $1",
    )
    .bind(id)
    .bind(actor)
    .bind(new_username)
    .execute(pool)
    .await?;
    Ok(())
}

/// Physical removal. Only reachable through the explicit purge operation.
pub async fn hard_delete(pool: &PgPool, username: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
