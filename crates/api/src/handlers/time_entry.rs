//! Handlers for the `/time-entries` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_core::timelog::{resolve_duration, total_minutes};
use pathos_core::types::DbId;
use pathos_db::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter};
use pathos_db::repositories::{
    clamp_limit, clamp_offset, MilestoneRepo, ProjectRepo, TaskRepo, TimeEntryRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;

/// Query parameters for `GET /time-entries`.
#[derive(Debug, Deserialize)]
pub struct TimeEntryListParams {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
}

/// Response body for `GET /time-entries`: the page plus the summed
/// duration of the returned entries.
#[derive(Debug, Serialize)]
pub struct TimeEntryList {
    pub time_entries: Vec<TimeEntry>,
    pub total_minutes: i64,
    pub count: usize,
}

/// POST /api/v1/time-entries
///
/// Log a block of time. The start/end range is authoritative: a
/// supplied duration that disagrees with it is rejected, and every
/// referenced project/task/milestone must belong to the caller.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    let duration = resolve_duration(input.duration, input.started_at, input.ended_at)?;

    if let Some(project_id) = input.project_id {
        ProjectRepo::find_owned(&state.pool, user.user_id, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }
    if let Some(task_id) = input.task_id {
        TaskRepo::find_owned(&state.pool, user.user_id, task_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            }))?;
    }
    if let Some(milestone_id) = input.milestone_id {
        MilestoneRepo::find_owned(&state.pool, user.user_id, milestone_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Milestone",
                id: milestone_id,
            }))?;
    }

    let entry = TimeEntryRepo::create(&state.pool, user.user_id, &input, duration).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/time-entries
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TimeEntryListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<TimeEntryList>> {
    let filter = TimeEntryFilter {
        project_id: params.project_id,
        task_id: params.task_id,
        milestone_id: params.milestone_id,
    };
    let time_entries = TimeEntryRepo::list(
        &state.pool,
        user.user_id,
        &filter,
        clamp_limit(page.limit, DEFAULT_PAGE_SIZE),
        clamp_offset(page.offset),
    )
    .await?;

    let total = total_minutes(time_entries.iter().map(|e| e.duration_minutes));
    let count = time_entries.len();
    Ok(Json(TimeEntryList {
        time_entries,
        total_minutes: total,
        count,
    }))
}
