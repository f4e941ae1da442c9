//! Repository for the `user_passions` membership join table.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::passion::{Passion, UserPassion};

const JOIN_COLUMNS: &str = "id, user_id, passion_id, created_at";

pub struct UserPassionRepo;

impl UserPassionRepo {
    /// Passions the user has joined, alphabetical.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Passion>, sqlx::Error> {
        sqlx::query_as::<_, Passion>(
            "SELECT p.id, p.name, p.slug, p.parent_id, p.is_custom,
                    p.description, p.icon, p.color, p.created_at
             FROM user_passions up
             JOIN passions p ON p.id = up.passion_id
             WHERE up.user_id = $1
             ORDER BY p.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn is_member(
        pool: &PgPool,
        user_id: DbId,
        passion_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM user_passions WHERE user_id = $1 AND passion_id = $2",
        )
        .bind(user_id)
        .bind(passion_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Join a passion. The `(user_id, passion_id)` unique constraint
    /// rejects a duplicate membership.
    pub async fn join(
        pool: &PgPool,
        user_id: DbId,
        passion_id: DbId,
    ) -> Result<UserPassion, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_passions (user_id, passion_id)
             VALUES ($1, $2)
             RETURNING {JOIN_COLUMNS}"
        );
        sqlx::query_as::<_, UserPassion>(&query)
            .bind(user_id)
            .bind(passion_id)
            .fetch_one(pool)
            .await
    }

    /// Leave a passion. Returns `true` if a membership row was removed.
    pub async fn leave(
        pool: &PgPool,
        user_id: DbId,
        passion_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_passions WHERE user_id = $1 AND passion_id = $2")
                .bind(user_id)
                .bind(passion_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
