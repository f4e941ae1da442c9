//! Handlers for the caller's passion memberships (`/user/passions`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_core::types::DbId;
use pathos_db::models::passion::{JoinPassion, Passion, UserPassion};
use pathos_db::repositories::{PassionRepo, UserPassionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/passions
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Passion>>>> {
    let passions = UserPassionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: passions }))
}

/// POST /api/v1/user/passions
///
/// Join a passion. Joining one twice is a conflict.
pub async fn join(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<JoinPassion>,
) -> AppResult<(StatusCode, Json<UserPassion>)> {
    PassionRepo::find_by_id(&state.pool, input.passion_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Passion",
            id: input.passion_id,
        }))?;

    if UserPassionRepo::is_member(&state.pool, user.user_id, input.passion_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Passion already joined".into(),
        )));
    }

    // The (user_id, passion_id) unique constraint backstops the
    // membership pre-check under concurrent joins.
    let membership = UserPassionRepo::join(&state.pool, user.user_id, input.passion_id).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// DELETE /api/v1/user/passions/{passion_id}
pub async fn leave(
    State(state): State<AppState>,
    user: AuthUser,
    Path(passion_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = UserPassionRepo::leave(&state.pool, user.user_id, passion_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "UserPassion",
            id: passion_id,
        }))
    }
}
