//! User entity model and DTOs.

use pathos_core::patch::Patch;
use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::enums::PrivacyLevel;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub privacy: PrivacyLevel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub privacy: PrivacyLevel,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            location: user.location,
            privacy: user.privacy,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password is hashed before this
/// struct is built.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// DTO for the profile update endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Patch<String>,
    pub privacy: Option<PrivacyLevel>,
}
