//! Milestone entity model, DTOs, and the progress-annotated views.

use pathos_core::patch::Patch;
use pathos_core::progress::MilestoneProgress;
use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::enums::MilestoneStatus;
use crate::models::task::TaskSummary;

/// A milestone row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: MilestoneStatus,
    pub target_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a milestone under an existing project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMilestone {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub target_date: Option<Timestamp>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

/// DTO for updating a milestone. `parent_id: null` makes it a root.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateMilestone {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    pub status: Option<MilestoneStatus>,
    #[serde(default)]
    pub parent_id: Patch<DbId>,
    #[serde(default)]
    pub target_date: Patch<Timestamp>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

/// Direct child summary used for progress and detail views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MilestoneChild {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub status: MilestoneStatus,
    pub completed_at: Option<Timestamp>,
}

/// A milestone with its direct children, tasks, and derived progress.
///
/// Progress is recomputed on every read; it is never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneWithProgress {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub children: Vec<MilestoneChild>,
    pub tasks: Vec<TaskSummary>,
    pub progress: MilestoneProgress,
}

/// Query filters for listing milestones.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneFilter {
    pub project_id: Option<DbId>,
    pub status: Option<MilestoneStatus>,
    /// `Some(None)` filters for roots only.
    pub parent_id: Option<Option<DbId>>,
}
