//! Repository for the global `passions` taxonomy.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::passion::{CreatePassion, Passion};

const COLUMNS: &str =
    "id, name, slug, parent_id, is_custom, description, icon, color, created_at";

pub struct PassionRepo;

impl PassionRepo {
    /// List the whole taxonomy, defaults first, then alphabetical.
    pub async fn list(pool: &PgPool) -> Result<Vec<Passion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM passions ORDER BY is_custom ASC, name ASC");
        sqlx::query_as::<_, Passion>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Passion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM passions WHERE id = $1");
        sqlx::query_as::<_, Passion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Probe a slug candidate for the uniqueness loop.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM passions WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(exists.is_some())
    }

    /// Insert a custom passion with a pre-resolved slug. The unique
    /// constraint on `slug` is the final arbiter under concurrent
    /// creation; a losing writer gets a database error that surfaces as
    /// a conflict.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePassion,
        slug: &str,
    ) -> Result<Passion, sqlx::Error> {
        let query = format!(
            "INSERT INTO passions (name, slug, parent_id, is_custom, description, icon, color)
             VALUES ($1, $2, $3, TRUE, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Passion>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.parent_id)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }
}
