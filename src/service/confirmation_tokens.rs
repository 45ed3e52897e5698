use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::ConfirmationToken;

/// Issues a fresh token for the user: random UUID string, valid on the
/// issue date and the following day.
pub async fn issue(
    pool: &PgPool,
    actor: Uuid,
    user_id: Uuid,
) -> Result<ConfirmationToken, AppError> {
    let token = Uuid::new_v4().to_string();
    let expires_on = Utc::now().date_naive() + chrono::Days::new(1);

    let created = db::confirmation_tokens::create(pool, actor, user_id, &token, expires_on).await?;
    Ok(created)
}

/// Resolves a token string, rejecting unknown and out-of-window tokens. The
/// window is the issue date and the day after, compared as calendar dates.
pub async fn validate(pool: &PgPool, token: &str) -> Result<ConfirmationToken, AppError> {
    let found = db::confirmation_tokens::find_by_token(pool, token)
        .await?
        .ok_or_else(|| AppError::NotFound("This token does not exist".to_string()))?;

    if !found.is_valid_on(Utc::now().date_naive()) {
        return Err(AppError::Gone("This token has expired".to_string()));
    }

    Ok(found)
}

pub async fn revoke(pool: &PgPool, actor: Uuid, id: Uuid) -> Result<(), AppError> {
    db::confirmation_tokens::soft_delete(pool, actor, id).await?;
    Ok(())
}
