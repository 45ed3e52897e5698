use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::dto::UserDto;
use crate::error::AppError;
use crate::response::Envelope;
use crate::service::{confirmation_tokens, users, SYSTEM_ACTOR};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Self-registration: the account starts disabled and a confirmation token
/// is issued. The confirmation email is fire-and-forget; delivery failure
/// is logged, never surfaced to the caller.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<users::CreateUser>,
) -> Result<Json<Envelope<UserDto>>, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = users::create(&state.pool, SYSTEM_ACTOR, req, false).await?;

    let token = confirmation_tokens::issue(&state.pool, SYSTEM_ACTOR, user.id).await?;

    let confirm_url = format!(
        "{}/api/v1/auth/confirm/{}",
        state.config.base_url, token.token
    );
    let username = user.username.clone();
    let mailer = state.mailer.clone();

    tokio::spawn(async move {
        match mailer {
            Some(mailer) => {
                if let Err(e) = mailer.send_confirmation(&username, &confirm_url).await {
                    tracing::error!("Failed to send confirmation email to {username}: {e}");
                }
            }
            None => {
                tracing::warn!("SMTP not configured. Confirmation URL for {username}: {confirm_url}");
            }
        }
    });

    Ok(Json(Envelope::new(
        "User has been created, please confirm your account",
        user,
    )))
}

pub async fn confirm(
    State(state): State<SharedState>,
    Path(token): Path<String>,
) -> Result<Json<Envelope<UserDto>>, AppError> {
    let confirmation = confirmation_tokens::validate(&state.pool, &token).await?;

    let user = users::confirm(&state.pool, SYSTEM_ACTOR, confirmation.user_id).await?;

    confirmation_tokens::revoke(&state.pool, SYSTEM_ACTOR, confirmation.id).await?;

    Ok(Json(Envelope::new("User has been confirmed", user)))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope<Value>>, AppError> {
    let user = db::users::find_by_username(&state.pool, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    if !user.enabled {
        return Err(AppError::Forbidden(
            "Account has not been confirmed".to_string(),
        ));
    }

    let role = db::roles::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Role {} not found", user.role_id)))?;

    let claims = Claims::new(user.id, user.username.clone(), role.name);
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(Envelope::new(
        "Login successful",
        json!({ "access_token": access_token }),
    )))
}
