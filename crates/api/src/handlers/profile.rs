//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_db::models::user::{UpdateProfile, UserResponse};
use pathos_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/profile
///
/// Update name, location, and profile privacy. `location: null` clears it.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let row = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(row.into()))
}
