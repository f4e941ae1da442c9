//! Project entity model and DTOs.

use pathos_core::patch::Patch;
use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::enums::{PrivacyLevel, ProjectStage, ProjectStatus};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub passion_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub stage: ProjectStage,
    pub privacy: PrivacyLevel,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub passion_id: DbId,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
    /// Defaults to `idea` if omitted.
    pub stage: Option<ProjectStage>,
    /// Defaults to `public` if omitted.
    pub privacy: Option<PrivacyLevel>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for updating a project. Omitted fields keep their stored value;
/// nullable fields use [`Patch`] so an explicit null clears them.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    pub status: Option<ProjectStatus>,
    pub stage: Option<ProjectStage>,
    pub privacy: Option<PrivacyLevel>,
    #[serde(default)]
    pub start_date: Patch<Timestamp>,
    #[serde(default)]
    pub end_date: Patch<Timestamp>,
}

/// Query filters for listing projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub passion_id: Option<DbId>,
    /// When false, only `public` projects are returned.
    pub viewer_is_owner: bool,
}
