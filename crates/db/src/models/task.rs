//! Task entity model and DTOs.

use pathos_core::patch::Patch;
use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub due_date: Option<Timestamp>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight task view for milestone progress/detail responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskSummary {
    pub id: DbId,
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

/// DTO for creating a task. A task created with only a milestone
/// inherits that milestone's project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

/// DTO for updating a task.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    pub completed: Option<bool>,
    #[serde(default)]
    pub project_id: Patch<DbId>,
    #[serde(default)]
    pub milestone_id: Patch<DbId>,
    #[serde(default)]
    pub due_date: Patch<Timestamp>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

/// Query filters for listing tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub completed: Option<bool>,
}
