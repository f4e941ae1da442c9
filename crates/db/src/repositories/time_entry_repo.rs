//! Repository for the `time_entries` table.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter};

const COLUMNS: &str = "id, user_id, project_id, task_id, milestone_id, description, \
                       duration_minutes, started_at, ended_at, created_at";

pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a logged time block. `duration_minutes` is the resolved
    /// value from `pathos_core::timelog`, not the raw client input.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTimeEntry,
        duration_minutes: i32,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries
                (user_id, project_id, task_id, milestone_id, description,
                 duration_minutes, started_at, ended_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.milestone_id)
            .bind(&input.description)
            .bind(duration_minutes)
            .bind(input.started_at)
            .bind(input.ended_at)
            .fetch_one(pool)
            .await
    }

    /// List the caller's time entries, most recent first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &TimeEntryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $1
               AND ($2::bigint IS NULL OR project_id = $2)
               AND ($3::bigint IS NULL OR task_id = $3)
               AND ($4::bigint IS NULL OR milestone_id = $4)
             ORDER BY started_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(filter.project_id)
            .bind(filter.task_id)
            .bind(filter.milestone_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
