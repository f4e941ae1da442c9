//! Entry (progress post) entity model and DTOs.

use pathos_core::patch::Patch;
use pathos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::enums::{EntryType, PrivacyLevel};

/// An entry row from the `entries` table. `published_at` null means the
/// entry is an unpublished draft.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub content: Option<String>,
    pub entry_type: EntryType,
    pub privacy: PrivacyLevel,
    pub media_urls: Vec<String>,
    pub links: Vec<String>,
    pub tags: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an entry. `published_at` defaults to now when
/// omitted; pass a draft through the update endpoint to unpublish.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEntry {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: Option<String>,
    /// Defaults to `progress`.
    pub entry_type: Option<EntryType>,
    /// Defaults to `public`.
    pub privacy: Option<PrivacyLevel>,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    #[serde(default)]
    #[validate(custom(function = "all_urls"))]
    pub media_urls: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "all_urls"))]
    pub links: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<Timestamp>,
}

/// DTO for updating an entry. Array fields are replaced wholesale when
/// present; `published_at: null` reverts the entry to a draft.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateEntry {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Patch<String>,
    pub entry_type: Option<EntryType>,
    pub privacy: Option<PrivacyLevel>,
    #[serde(default)]
    pub milestone_id: Patch<DbId>,
    #[validate(custom(function = "all_urls"))]
    pub media_urls: Option<Vec<String>>,
    #[validate(custom(function = "all_urls"))]
    pub links: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published_at: Patch<Timestamp>,
}

/// Query filters for listing entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter {
    pub project_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub entry_type: Option<EntryType>,
    /// `Some(true)` = published only, `Some(false)` = drafts only.
    pub published: Option<bool>,
}

fn all_urls(values: &Vec<String>) -> Result<(), ValidationError> {
    use validator::ValidateUrl;
    for value in values {
        if !value.validate_url() {
            return Err(ValidationError::new("url"));
        }
    }
    Ok(())
}
