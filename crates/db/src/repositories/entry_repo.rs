//! Repository for the `entries` table.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::entry::{CreateEntry, Entry, EntryFilter, UpdateEntry};

const COLUMNS: &str = "id, user_id, project_id, milestone_id, title, content, entry_type, \
                       privacy, media_urls, links, tags, published_at, created_at, updated_at";

pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry. An omitted `published_at` publishes now;
    /// drafts are made by clearing it through the update endpoint.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateEntry,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries
                (user_id, project_id, milestone_id, title, content, entry_type, privacy,
                 media_urls, links, tags, published_at)
             VALUES ($1, $2, $3, $4, $5,
                     COALESCE($6, 'progress'::entry_type),
                     COALESCE($7, 'public'::privacy_level),
                     $8, $9, $10, COALESCE($11, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(input.project_id)
            .bind(input.milestone_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.entry_type)
            .bind(input.privacy)
            .bind(&input.media_urls)
            .bind(&input.links)
            .bind(&input.tags)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE user_id = $1
               AND ($2::bigint IS NULL OR project_id = $2)
               AND ($3::bigint IS NULL OR milestone_id = $3)
               AND ($4::entry_type IS NULL OR entry_type = $4)
               AND ($5::bool IS NULL OR (published_at IS NOT NULL) = $5)
             ORDER BY published_at DESC NULLS LAST, created_at DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(filter.project_id)
            .bind(filter.milestone_id)
            .bind(filter.entry_type)
            .bind(filter.published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Array fields are replaced wholesale when
    /// present; `published_at` supports explicit clearing (unpublish).
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateEntry,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET
                title = COALESCE($3, title),
                content = CASE WHEN $4 THEN $5 ELSE content END,
                entry_type = COALESCE($6, entry_type),
                privacy = COALESCE($7, privacy),
                milestone_id = CASE WHEN $8 THEN $9 ELSE milestone_id END,
                media_urls = COALESCE($10, media_urls),
                links = COALESCE($11, links),
                tags = COALESCE($12, tags),
                published_at = CASE WHEN $13 THEN $14 ELSE published_at END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.content.is_set())
            .bind(input.content.as_option())
            .bind(input.entry_type)
            .bind(input.privacy)
            .bind(input.milestone_id.is_set())
            .bind(input.milestone_id.as_option())
            .bind(&input.media_urls)
            .bind(&input.links)
            .bind(&input.tags)
            .bind(input.published_at.is_set())
            .bind(input.published_at.as_option())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
