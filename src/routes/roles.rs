use axum::extract::State;
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::dto::RoleDto;
use crate::error::AppError;
use crate::response::Envelope;
use crate::service::roles;
use crate::state::SharedState;

pub async fn read_all(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<RoleDto>>>, AppError> {
    auth.require_any_role(&["Admin"])?;

    let list = roles::list_all(&state.pool).await?;
    Ok(Json(Envelope::new("Successfully retrieved all roles", list)))
}
