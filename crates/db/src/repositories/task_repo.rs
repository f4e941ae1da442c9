//! Repository for the `tasks` table.

use pathos_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilter, TaskSummary, UpdateTask};

const COLUMNS: &str = "id, user_id, project_id, milestone_id, title, description, completed, \
                       completed_at, due_date, sort_order, created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task. `project_id` is the already-resolved project
    /// (inherited from the milestone when the caller gave only that).
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTask,
        project_id: Option<DbId>,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (user_id, project_id, milestone_id, title, description, due_date, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(input.milestone_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE user_id = $1
               AND ($2::bigint IS NULL OR project_id = $2)
               AND ($3::bigint IS NULL OR milestone_id = $3)
               AND ($4::bool IS NULL OR completed = $4)
             ORDER BY sort_order ASC, created_at ASC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(filter.project_id)
            .bind(filter.milestone_id)
            .bind(filter.completed)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Task summaries directly attached to the given milestones, for
    /// progress rollups.
    pub async fn summaries_for_milestones(
        pool: &PgPool,
        user_id: DbId,
        milestone_ids: &[DbId],
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        sqlx::query_as::<_, TaskSummary>(
            "SELECT id, milestone_id, title, completed, completed_at
             FROM tasks
             WHERE user_id = $1 AND milestone_id = ANY($2)
             ORDER BY sort_order ASC, created_at ASC",
        )
        .bind(user_id)
        .bind(milestone_ids)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. `completed_at` is written exactly when
    /// the caller resolved a completion transition, atomically with the
    /// `completed` flag.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateTask,
        completed_at: Option<Option<Timestamp>>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                completed = COALESCE($6, completed),
                completed_at = CASE WHEN $7 THEN $8 ELSE completed_at END,
                project_id = CASE WHEN $9 THEN $10 ELSE project_id END,
                milestone_id = CASE WHEN $11 THEN $12 ELSE milestone_id END,
                due_date = CASE WHEN $13 THEN $14 ELSE due_date END,
                sort_order = COALESCE($15, sort_order),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.description.is_set())
            .bind(input.description.as_option())
            .bind(input.completed)
            .bind(completed_at.is_some())
            .bind(completed_at.flatten())
            .bind(input.project_id.is_set())
            .bind(input.project_id.as_option())
            .bind(input.milestone_id.is_set())
            .bind(input.milestone_id.as_option())
            .bind(input.due_date.is_set())
            .bind(input.due_date.as_option())
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
