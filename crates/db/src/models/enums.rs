//! Enumerations shared across entities, mapped to PostgreSQL enum types.

use serde::{Deserialize, Serialize};

/// Visibility of a project, entry, or profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "privacy_level", rename_all = "lowercase")]
pub enum PrivacyLevel {
    Private,
    Friends,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "project_stage", rename_all = "lowercase")]
pub enum ProjectStage {
    Idea,
    Planning,
    Development,
    Testing,
    Launch,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "milestone_status", rename_all = "lowercase")]
pub enum MilestoneStatus {
    Planned,
    Active,
    Completed,
    Skipped,
}

impl MilestoneStatus {
    /// Whether this status counts toward parent progress and carries a
    /// `completed_at` timestamp.
    pub fn is_completed(self) -> bool {
        matches!(self, MilestoneStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_type", rename_all = "lowercase")]
pub enum EntryType {
    Progress,
    Milestone,
    Note,
    Media,
    Link,
}
