//! Time-entry model and DTOs.

use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A logged block of time from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for logging time. The duration, if supplied, must agree with the
/// `started_at`/`ended_at` span (see `pathos_core::timelog`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeEntry {
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
}

/// Query filters for listing time entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeEntryFilter {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
}
