//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_core::types::DbId;
use pathos_db::models::enums::{PrivacyLevel, ProjectStatus};
use pathos_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use pathos_db::repositories::{PassionRepo, ProjectRepo, UserPassionRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<ProjectStatus>,
    pub passion_id: Option<DbId>,
    /// View another user's projects. Only their public projects are
    /// returned; the response never reveals whether private ones exist.
    pub user_id: Option<DbId>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;

    let passion = PassionRepo::find_by_id(&state.pool, input.passion_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Passion",
            id: input.passion_id,
        }))?;

    // Custom passions require membership; curated defaults do not.
    if passion.is_custom
        && !UserPassionRepo::is_member(&state.pool, user.user_id, passion.id).await?
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Add this passion to your interests first".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let owner_id = params.user_id.unwrap_or(user.user_id);
    let filter = ProjectFilter {
        status: params.status,
        passion_id: params.passion_id,
        viewer_is_owner: owner_id == user.user_id,
    };
    let projects = ProjectRepo::list(&state.pool, owner_id, &filter).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
///
/// Owners see their project at any privacy level; everyone else only
/// when it is public. Friends-level visibility is not implemented yet
/// and is treated as owner-only, so a non-owner gets the same 404 as
/// for a missing project.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_any(&state.pool, id)
        .await?
        .filter(|p| p.user_id == user.user_id || p.privacy == PrivacyLevel::Public)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let project = ProjectRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the project and everything scoped to it (milestones, tasks,
/// entries, time entries) through the relational cascade.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
