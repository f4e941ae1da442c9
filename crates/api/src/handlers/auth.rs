//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pathos_core::error::CoreError;
use pathos_core::types::DbId;
use pathos_db::models::user::{CreateUser, UserResponse};
use pathos_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: Option<String>,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account. The username must be unused; the `uq_users_username`
/// constraint backstops the pre-check under concurrent signups.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let response = create_auth_response(&state, user.id).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The
/// presented token's session is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let response = create_auth_response(&state, session.user_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token's session. The session must belong
/// to the authenticated caller.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    if let Some(session) = SessionRepo::find_active_by_hash(&state.pool, &token_hash).await? {
        if session.user_id == user.user_id {
            SessionRepo::revoke(&state.pool, session.id).await?;
        }
    }

    // Revoking an unknown token is a no-op, not an error.
    Ok(StatusCode::NO_CONTENT)
}

/// Issue an access token + refresh token pair and persist the session.
async fn create_auth_response(state: &AppState, user_id: DbId) -> AppResult<AuthResponse> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}
