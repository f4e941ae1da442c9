//! Repository for refresh-token sessions.

use pathos_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::Session;

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Record a new session for a freshly issued refresh token.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live (unexpired, unrevoked) session by refresh-token hash.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a session (token rotation or logout). Returns `true` if a
    /// live session was revoked.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
