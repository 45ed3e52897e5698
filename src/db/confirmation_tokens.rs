use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ConfirmationToken;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    actor: Uuid,
    user_id: Uuid,
    token: &str,
    expires_on: NaiveDate,
) -> Result<ConfirmationToken, sqlx::Error> {
    sqlx::query_as::<_, ConfirmationToken>(
        "INSERT INTO confirmation_tokens (user_id, token, expires_on, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_on)
    .bind(actor)
    .fetch_one(executor)
    .await
}

pub async fn find_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<ConfirmationToken>, sqlx::Error> {
    sqlx::query_as::<_, ConfirmationToken>(
        "SELECT * FROM confirmation_tokens WHERE token = $1 AND is_deleted = false",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, actor: Uuid, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE confirmation_tokens SET is_deleted = true, updated_at = now(), updated_by = $2
         WHERE id = $1",
    )
    .bind(id)
    .bind(actor)
    .execute(pool)
    .await?;
    Ok(())
}
