//! Repository for the `milestones` table, including the deletion
//! cascade and the tree-arena queries used for reparent validation.

use pathos_core::tree::MilestoneNode;
use pathos_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::milestone::{
    CreateMilestone, Milestone, MilestoneChild, MilestoneFilter, UpdateMilestone,
};

const COLUMNS: &str = "id, user_id, project_id, parent_id, title, description, status, \
                       target_date, completed_at, sort_order, created_at, updated_at";

pub struct MilestoneRepo;

impl MilestoneRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones
                (user_id, project_id, parent_id, title, description, target_date, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(user_id)
            .bind(input.project_id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.target_date)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a milestone owned by the caller inside a specific project.
    /// Used for same-project reference checks on tasks and entries.
    pub async fn find_in_project(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones
             WHERE id = $1 AND user_id = $2 AND project_id = $3"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(user_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List milestones with optional project/status/parent filters.
    /// `filter.parent_id = Some(None)` selects roots only.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &MilestoneFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones
             WHERE user_id = $1
               AND ($2::bigint IS NULL OR project_id = $2)
               AND ($3::milestone_status IS NULL OR status = $3)
               AND (NOT $4::bool OR parent_id IS NOT DISTINCT FROM $5)
             ORDER BY sort_order ASC, created_at ASC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(user_id)
            .bind(filter.project_id)
            .bind(filter.status)
            .bind(filter.parent_id.is_some())
            .bind(filter.parent_id.flatten())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Snapshot the id/parent arena of one project's milestones for
    /// cycle detection.
    pub async fn project_nodes(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Vec<MilestoneNode>, sqlx::Error> {
        let rows: Vec<(DbId, Option<DbId>)> = sqlx::query_as(
            "SELECT id, parent_id FROM milestones WHERE user_id = $1 AND project_id = $2",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, parent_id)| MilestoneNode { id, parent_id })
            .collect())
    }

    /// Direct children of the given milestones, for progress rollups.
    pub async fn children_for(
        pool: &PgPool,
        user_id: DbId,
        milestone_ids: &[DbId],
    ) -> Result<Vec<MilestoneChild>, sqlx::Error> {
        sqlx::query_as::<_, MilestoneChild>(
            "SELECT id, parent_id, title, status, completed_at
             FROM milestones
             WHERE user_id = $1 AND parent_id = ANY($2)
             ORDER BY sort_order ASC, created_at ASC",
        )
        .bind(user_id)
        .bind(milestone_ids)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. `completed_at` is written exactly when
    /// the caller resolved a status transition (`Some(..)`), in the same
    /// statement as the status itself.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateMilestone,
        completed_at: Option<Option<Timestamp>>,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                completed_at = CASE WHEN $7 THEN $8 ELSE completed_at END,
                parent_id = CASE WHEN $9 THEN $10 ELSE parent_id END,
                target_date = CASE WHEN $11 THEN $12 ELSE target_date END,
                sort_order = COALESCE($13, sort_order),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.description.is_set())
            .bind(input.description.as_option())
            .bind(input.status)
            .bind(completed_at.is_some())
            .bind(completed_at.flatten())
            .bind(input.parent_id.is_set())
            .bind(input.parent_id.as_option())
            .bind(input.target_date.is_set())
            .bind(input.target_date.as_option())
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone with the three-part cleanup: promote child
    /// milestones to root, unlink tasks, unlink entries. Runs in one
    /// transaction so either everything lands or nothing does. Returns
    /// `false` when the caller owns no such milestone.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM milestones WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let promoted =
            sqlx::query("UPDATE milestones SET parent_id = NULL WHERE parent_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        let tasks_unlinked =
            sqlx::query("UPDATE tasks SET milestone_id = NULL WHERE milestone_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        let entries_unlinked =
            sqlx::query("UPDATE entries SET milestone_id = NULL WHERE milestone_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            milestone_id = id,
            promoted,
            tasks_unlinked,
            entries_unlinked,
            "milestone deleted with cascade"
        );
        Ok(true)
    }
}
