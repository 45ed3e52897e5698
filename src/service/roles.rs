use sqlx::PgPool;

use crate::db;
use crate::dto::RoleDto;
use crate::error::AppError;

pub async fn list_all(pool: &PgPool) -> Result<Vec<RoleDto>, AppError> {
    let roles = db::roles::list_all(pool).await?;
    Ok(roles.into_iter().map(RoleDto::from).collect())
}
