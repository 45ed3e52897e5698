use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::db;
use crate::dto::UserDto;
use crate::error::AppError;
use crate::models::{Gender, User};

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub gender: Gender,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "Employee".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub gender: Gender,
    pub role: String,
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<UserDto>, AppError> {
    let users = db::users::list_all(pool).await?;
    Ok(users.into_iter().map(UserDto::from).collect())
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<UserDto, AppError> {
    let user = db::users::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;
    Ok(user.into())
}

pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<UserDto>, AppError> {
    let users = db::users::list_by_role(pool, role).await?;
    Ok(users.into_iter().map(UserDto::from).collect())
}

/// Creates a user with a one-way hashed password. `enabled` is false for
/// self-registration (pending email confirmation) and true for
/// administrator-created accounts.
pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    req: CreateUser,
    enabled: bool,
) -> Result<UserDto, AppError> {
    if db::users::find_by_username(pool, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let role = db::roles::find_by_name(pool, &req.role)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", req.role)))?;

    let password_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = db::users::create(
        pool,
        actor,
        &req.username,
        &password_hash,
        &req.first_name,
        &req.last_name,
        &req.phone,
        req.gender,
        role.id,
        enabled,
    )
    .await?;

    Ok(user.into())
}

/// Full update keyed by username. The password is re-hashed and the account
/// is forced enabled.
pub async fn update(pool: &PgPool, actor: Uuid, req: UpdateUser) -> Result<UserDto, AppError> {
    let existing = db::users::find_by_username(pool, &req.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let role = db::roles::find_by_name(pool, &req.role)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", req.role)))?;

    let password_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = db::users::update(
        pool,
        actor,
        existing.id,
        &password_hash,
        &req.first_name,
        &req.last_name,
        &req.phone,
        req.gender,
        role.id,
    )
    .await?;

    Ok(user.into())
}

/// Soft-delete with a rename (`{username}-{id}`) that frees the username.
/// Refused while the user is still referenced as a project manager or task
/// assignee.
pub async fn delete(pool: &PgPool, actor: Uuid, username: &str) -> Result<(), AppError> {
    let user = db::users::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !can_be_deleted(pool, &user).await? {
        return Err(AppError::Conflict(
            "User can not be deleted. It is linked to a project or task".to_string(),
        ));
    }

    let new_username = format!("{}-{}", user.username, user.id);
    db::users::rename_and_soft_delete(pool, actor, user.id, &new_username).await?;
    Ok(())
}

/// Managers are deletable with zero assigned active projects, employees with
/// zero assigned active tasks; any other role is always deletable.
pub async fn can_be_deleted(pool: &PgPool, user: &User) -> Result<bool, AppError> {
    let role = db::roles::find_by_id(pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Role {} not found", user.role_id)))?;

    match role.name.as_str() {
        "Manager" => {
            let projects = db::projects::list_by_manager(pool, user.id).await?;
            Ok(projects.is_empty())
        }
        "Employee" => {
            let tasks = db::tasks::list_by_assignee(pool, user.id).await?;
            Ok(tasks.is_empty())
        }
        _ => Ok(true),
    }
}

/// Hard delete. Explicit administrative operation; bypasses the soft-delete
/// rename entirely.
pub async fn purge(pool: &PgPool, username: &str) -> Result<(), AppError> {
    let removed = db::users::hard_delete(pool, username).await?;
    if removed == 0 {
        return Err(AppError::NotFound("User does not exist".to_string()));
    }
    Ok(())
}

/// Enables the account after a successful confirmation-token validation.
pub async fn confirm(pool: &PgPool, actor: Uuid, user_id: Uuid) -> Result<UserDto, AppError> {
    let user = db::users::set_enabled(pool, actor, user_id, true).await?;
    Ok(user.into())
}
