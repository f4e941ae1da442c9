//! Handler for the onboarding batch import.

use axum::extract::State;
use axum::Json;
use pathos_core::onboarding::{plan_projects, ProjectSeed};
use pathos_core::types::DbId;
use pathos_db::repositories::onboarding_repo::ImportSummary;
use pathos_db::repositories::OnboardingRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One project idea as typed in the onboarding form.
#[derive(Debug, Deserialize)]
pub struct ProjectSeedInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// Per-passion detail block.
#[derive(Debug, Deserialize)]
pub struct PassionDetailInput {
    pub passion_id: DbId,
    pub specific_area: Option<String>,
    pub current_level: Option<String>,
    #[serde(default)]
    pub active_projects: Vec<ProjectSeedInput>,
}

/// Request body for `POST /onboarding/import`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub passion_details: Vec<PassionDetailInput>,
}

/// POST /api/v1/onboarding/import
///
/// Materialize the onboarding form: per joined passion, create projects
/// with an initial "Next Steps" milestone, one task per step, and an
/// optional note entry. Malformed sub-items (blank titles, step lists
/// with nothing in them) and passions the user never joined are
/// skipped; the rest of the batch still lands.
pub async fn import(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ImportRequest>,
) -> AppResult<Json<ImportSummary>> {
    let plans: Vec<_> = input
        .passion_details
        .into_iter()
        .map(|detail| {
            let seeds: Vec<ProjectSeed> = detail
                .active_projects
                .into_iter()
                .map(|p| ProjectSeed {
                    title: p.title,
                    description: p.description,
                    next_steps: p.next_steps,
                })
                .collect();
            let planned = plan_projects(
                &seeds,
                detail.specific_area.as_deref(),
                detail.current_level.as_deref(),
            );
            (detail.passion_id, planned)
        })
        .collect();

    let summary = OnboardingRepo::import(&state.pool, user.user_id, &plans).await?;
    Ok(Json(summary))
}
