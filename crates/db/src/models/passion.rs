//! Passion taxonomy models and DTOs.

use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the global `passions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Passion {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub is_custom: bool,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a custom passion. The slug is derived server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePassion {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// A row from the `user_passions` join table (membership, not ownership).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPassion {
    pub id: DbId,
    pub user_id: DbId,
    pub passion_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for joining a passion.
#[derive(Debug, Deserialize)]
pub struct JoinPassion {
    pub passion_id: DbId,
}
