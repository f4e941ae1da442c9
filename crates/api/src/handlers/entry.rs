//! Handlers for the `/entries` resource (progress posts).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_core::patch::Patch;
use pathos_core::types::DbId;
use pathos_db::models::entry::{CreateEntry, Entry, EntryFilter, UpdateEntry};
use pathos_db::models::enums::EntryType;
use pathos_db::repositories::{clamp_limit, clamp_offset, EntryRepo, MilestoneRepo, ProjectRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{lenient_bool, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Query parameters for `GET /entries`.
#[derive(Debug, Deserialize)]
pub struct EntryListParams {
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub entry_type: Option<EntryType>,
    /// `published=true` selects published entries, anything else drafts.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub published: Option<bool>,
}

/// POST /api/v1/entries
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateEntry>,
) -> AppResult<(StatusCode, Json<Entry>)> {
    input.validate()?;

    ProjectRepo::find_owned(&state.pool, user.user_id, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    if let Some(milestone_id) = input.milestone_id {
        MilestoneRepo::find_in_project(&state.pool, user.user_id, input.project_id, milestone_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Milestone",
                id: milestone_id,
            }))?;
    }

    let entry = EntryRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/entries
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<EntryListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Entry>>>> {
    let filter = EntryFilter {
        project_id: params.project_id,
        milestone_id: params.milestone_id,
        entry_type: params.entry_type,
        published: params.published,
    };
    let entries = EntryRepo::list(
        &state.pool,
        user.user_id,
        &filter,
        clamp_limit(page.limit, DEFAULT_PAGE_SIZE),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Entry>> {
    let entry = EntryRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;
    Ok(Json(entry))
}

/// PUT /api/v1/entries/{id}
///
/// Partial update. `milestone_id` must stay within the entry's project;
/// `published_at: null` reverts the entry to a draft.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntry>,
) -> AppResult<Json<Entry>> {
    input.validate()?;

    let existing = EntryRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    if let Patch::Value(milestone_id) = input.milestone_id {
        MilestoneRepo::find_in_project(
            &state.pool,
            user.user_id,
            existing.project_id,
            milestone_id,
        )
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;
    }

    let entry = EntryRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/entries/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EntryRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Entry", id }))
    }
}
