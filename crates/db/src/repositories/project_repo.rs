//! Repository for the `projects` table.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

const COLUMNS: &str = "id, user_id, passion_id, title, description, status, stage, privacy, \
                       start_date, end_date, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `user_id`. Omitted enums take the
    /// documented defaults (active / idea / public).
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (user_id, passion_id, title, description, status, stage, privacy, start_date, end_date)
             VALUES ($1, $2, $3, $4,
                     COALESCE($5, 'active'::project_status),
                     COALESCE($6, 'idea'::project_stage),
                     COALESCE($7, 'public'::privacy_level),
                     $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(input.passion_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.stage)
            .bind(input.privacy)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project owned by the caller.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project regardless of owner. Callers must apply the
    /// privacy rules before exposing the row.
    pub async fn find_any(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List `owner_id`'s projects. When the viewer is not the owner,
    /// only public projects are returned.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE user_id = $1
               AND ($2::project_status IS NULL OR status = $2)
               AND ($3::bigint IS NULL OR passion_id = $3)
               AND ($4::bool OR privacy = 'public')
             ORDER BY status ASC, updated_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(filter.status)
            .bind(filter.passion_id)
            .bind(filter.viewer_is_owner)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only provided fields are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                stage = COALESCE($7, stage),
                privacy = COALESCE($8, privacy),
                start_date = CASE WHEN $9 THEN $10 ELSE start_date END,
                end_date = CASE WHEN $11 THEN $12 ELSE end_date END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.description.is_set())
            .bind(input.description.as_option())
            .bind(input.status)
            .bind(input.stage)
            .bind(input.privacy)
            .bind(input.start_date.is_set())
            .bind(input.start_date.as_option())
            .bind(input.end_date.is_set())
            .bind(input.end_date.as_option())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Milestones, tasks, entries, and time entries
    /// scoped to it go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
