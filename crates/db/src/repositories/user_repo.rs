//! Repository for the `users` table.

use pathos_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, email, password_hash, name, location, privacy, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only provided fields are touched;
    /// `location` supports explicit clearing.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                location = CASE WHEN $3 THEN $4 ELSE location END,
                privacy = COALESCE($5, privacy),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.location.is_set())
            .bind(input.location.as_option())
            .bind(input.privacy)
            .fetch_optional(pool)
            .await
    }
}
