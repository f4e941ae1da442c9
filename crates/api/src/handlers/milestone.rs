//! Handlers for the `/milestones` resource.
//!
//! Milestones are the tree layer of a project: list/detail responses
//! carry a derived progress summary over direct tasks and direct
//! children, reparenting is validated against the project's milestone
//! arena, and deletion runs the promote/unlink cascade.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pathos_core::error::CoreError;
use pathos_core::patch::Patch;
use pathos_core::progress::milestone_progress;
use pathos_core::tree::{completion_timestamp, validate_reparent};
use pathos_core::types::{DbId, Timestamp};
use pathos_db::models::enums::MilestoneStatus;
use pathos_db::models::milestone::{
    CreateMilestone, Milestone, MilestoneChild, MilestoneFilter, MilestoneWithProgress,
    UpdateMilestone,
};
use pathos_db::models::task::TaskSummary;
use pathos_db::repositories::{clamp_limit, clamp_offset, MilestoneRepo, ProjectRepo, TaskRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;

/// Query parameters for `GET /milestones`.
#[derive(Debug, Deserialize)]
pub struct MilestoneListParams {
    pub project_id: Option<DbId>,
    pub status: Option<MilestoneStatus>,
    /// `parent_id=` or `parent_id=null` selects roots; a numeric value
    /// selects that parent's children; garbage disables the filter.
    pub parent_id: Option<String>,
}

impl MilestoneListParams {
    fn parent_filter(&self) -> Option<Option<DbId>> {
        match self.parent_id.as_deref() {
            None => None,
            Some("") | Some("null") => Some(None),
            Some(raw) => raw.parse().ok().map(Some),
        }
    }
}

/// POST /api/v1/milestones
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<MilestoneWithProgress>)> {
    input.validate()?;

    ProjectRepo::find_owned(&state.pool, user.user_id, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    if let Some(parent_id) = input.parent_id {
        MilestoneRepo::find_in_project(&state.pool, user.user_id, input.project_id, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Milestone",
                id: parent_id,
            }))?;
    }

    let milestone = MilestoneRepo::create(&state.pool, user.user_id, &input).await?;
    let view = with_progress(&state, user.user_id, milestone).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/milestones
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MilestoneListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<MilestoneWithProgress>>>> {
    let filter = MilestoneFilter {
        project_id: params.project_id,
        status: params.status,
        parent_id: params.parent_filter(),
    };
    let milestones = MilestoneRepo::list(
        &state.pool,
        user.user_id,
        &filter,
        clamp_limit(page.limit, DEFAULT_PAGE_SIZE),
        clamp_offset(page.offset),
    )
    .await?;
    let views = attach_progress(&state, user.user_id, milestones).await?;
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/milestones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MilestoneWithProgress>> {
    let milestone = MilestoneRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    let view = with_progress(&state, user.user_id, milestone).await?;
    Ok(Json(view))
}

/// PUT /api/v1/milestones/{id}
///
/// Partial update. Only fields present in the body are touched;
/// `parent_id: null` promotes the milestone to a root. A status change
/// into or out of `completed` sets or clears `completed_at` in the same
/// write.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<MilestoneWithProgress>> {
    input.validate()?;

    let existing = MilestoneRepo::find_owned(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    if let Patch::Value(new_parent) = input.parent_id {
        let arena =
            MilestoneRepo::project_nodes(&state.pool, user.user_id, existing.project_id).await?;
        validate_reparent(&arena, existing.id, new_parent)?;
    }

    let completed_at = resolve_completed_at(&existing, input.status);

    let milestone = MilestoneRepo::update(&state.pool, user.user_id, id, &input, completed_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    let view = with_progress(&state, user.user_id, milestone).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/milestones/{id}
///
/// Promotes child milestones to root and unlinks tasks and entries
/// (they are kept, not deleted), then removes the milestone. The whole
/// cleanup is one transaction.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MilestoneRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))
    }
}

/// Map a requested status change onto the `completed_at` column write.
fn resolve_completed_at(
    existing: &Milestone,
    new_status: Option<MilestoneStatus>,
) -> Option<Option<Timestamp>> {
    new_status.map(|status| {
        completion_timestamp(
            existing.status.is_completed(),
            status.is_completed(),
            existing.completed_at,
            Utc::now(),
        )
    })
}

/// Load children and tasks for one milestone and compute its progress.
async fn with_progress(
    state: &AppState,
    user_id: DbId,
    milestone: Milestone,
) -> Result<MilestoneWithProgress, AppError> {
    let mut views = attach_progress(state, user_id, vec![milestone]).await?;
    views
        .pop()
        .ok_or_else(|| AppError::InternalError("progress rollup lost its milestone".into()))
}

/// Batch-load direct children and tasks for a page of milestones and
/// attach recomputed progress to each.
async fn attach_progress(
    state: &AppState,
    user_id: DbId,
    milestones: Vec<Milestone>,
) -> Result<Vec<MilestoneWithProgress>, AppError> {
    let ids: Vec<DbId> = milestones.iter().map(|m| m.id).collect();
    let children = MilestoneRepo::children_for(&state.pool, user_id, &ids).await?;
    let tasks = TaskRepo::summaries_for_milestones(&state.pool, user_id, &ids).await?;

    let mut children_by_parent: HashMap<DbId, Vec<MilestoneChild>> = HashMap::new();
    for child in children {
        if let Some(parent_id) = child.parent_id {
            children_by_parent.entry(parent_id).or_default().push(child);
        }
    }
    let mut tasks_by_milestone: HashMap<DbId, Vec<TaskSummary>> = HashMap::new();
    for task in tasks {
        if let Some(milestone_id) = task.milestone_id {
            tasks_by_milestone
                .entry(milestone_id)
                .or_default()
                .push(task);
        }
    }

    Ok(milestones
        .into_iter()
        .map(|milestone| {
            let children = children_by_parent.remove(&milestone.id).unwrap_or_default();
            let tasks = tasks_by_milestone.remove(&milestone.id).unwrap_or_default();
            let progress = milestone_progress(
                tasks.iter().map(|t| t.completed),
                children.iter().map(|c| c.status.is_completed()),
            );
            MilestoneWithProgress {
                milestone,
                children,
                tasks,
                progress,
            }
        })
        .collect())
}
