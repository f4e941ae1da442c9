//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pathos_core::error::CoreError;
use pathos_core::patch::Patch;
use pathos_core::tree::completion_timestamp;
use pathos_core::types::{DbId, Timestamp};
use pathos_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use pathos_db::repositories::{clamp_limit, clamp_offset, MilestoneRepo, ProjectRepo, TaskRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{lenient_bool, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;

/// Query parameters for `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: Option<bool>,
}

/// POST /api/v1/tasks
///
/// A task may attach to a project, a milestone, or both. With only a
/// milestone given, the task inherits that milestone's project so the
/// two references can never disagree.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;

    if let Some(project_id) = input.project_id {
        ProjectRepo::find_owned(&state.pool, user.user_id, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }

    let mut project_id = input.project_id;
    if let Some(milestone_id) = input.milestone_id {
        let milestone = match project_id {
            // Both given: the milestone must live in that project.
            Some(pid) => {
                MilestoneRepo::find_in_project(&state.pool, user.user_id, pid, milestone_id).await?
            }
            None => MilestoneRepo::find_owned(&state.pool, user.user_id, milestone_id).await?,
        }
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;
        project_id = Some(milestone.project_id);
    }

    let task = TaskRepo::create(&state.pool, user.user_id, &input, project_id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TaskListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let filter = TaskFilter {
        project_id: params.project_id,
        milestone_id: params.milestone_id,
        completed: params.completed,
    };
    let tasks = TaskRepo::list(
        &state.pool,
        user.user_id,
        &filter,
        clamp_limit(page.limit, DEFAULT_PAGE_SIZE),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update. Flipping `completed` sets or clears `completed_at`
/// in the same write; re-linking to a milestone re-checks the
/// same-project invariant and adopts the milestone's project when the
/// task has none.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    input.validate()?;

    let existing = TaskRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    if let Patch::Value(project_id) = input.project_id {
        ProjectRepo::find_owned(&state.pool, user.user_id, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }

    // The project the task will reference after this update.
    let effective_project = input.project_id.apply(existing.project_id);

    let mut input = input;
    if let Patch::Value(milestone_id) = input.milestone_id {
        let milestone = match effective_project {
            Some(pid) => {
                MilestoneRepo::find_in_project(&state.pool, user.user_id, pid, milestone_id).await?
            }
            None => MilestoneRepo::find_owned(&state.pool, user.user_id, milestone_id).await?,
        }
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;
        // A task linked to a milestone always shares its project.
        if effective_project.is_none() {
            input.project_id = Patch::Value(milestone.project_id);
        }
    }

    let completed_at = resolve_completed_at(&existing, input.completed);

    let task = TaskRepo::update(&state.pool, user.user_id, id, &input, completed_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

/// Map a requested `completed` change onto the `completed_at` write.
fn resolve_completed_at(existing: &Task, new_completed: Option<bool>) -> Option<Option<Timestamp>> {
    new_completed.map(|completed| {
        completion_timestamp(
            existing.completed,
            completed,
            existing.completed_at,
            Utc::now(),
        )
    })
}
