//! Handlers for the global `/passions` taxonomy.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pathos_core::error::CoreError;
use pathos_core::slug::{slug_candidates, slugify};
use pathos_db::models::passion::{CreatePassion, Passion};
use pathos_db::repositories::{PassionRepo, UserPassionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on slug probes for one create. A name with this many
/// live collisions means something else is wrong.
const SLUG_PROBE_LIMIT: usize = 1000;

/// GET /api/v1/passions
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Passion>>>> {
    let passions = PassionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: passions }))
}

/// POST /api/v1/passions
///
/// Create a custom passion. The slug is derived from the name and
/// disambiguated with a numeric suffix; the creator is joined to the
/// new passion automatically.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePassion>,
) -> AppResult<(StatusCode, Json<Passion>)> {
    input.validate()?;

    if let Some(parent_id) = input.parent_id {
        PassionRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Passion",
                id: parent_id,
            }))?;
    }

    let base = slugify(&input.name);
    let mut slug = None;
    for candidate in slug_candidates(&base).take(SLUG_PROBE_LIMIT) {
        if !PassionRepo::slug_exists(&state.pool, &candidate).await? {
            slug = Some(candidate);
            break;
        }
    }
    let slug = slug.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Could not allocate a unique slug for '{base}'"
        )))
    })?;

    // Two racing creators can both pick the same candidate here; the
    // unique constraint on `slug` fails the loser with a 409.
    let passion = PassionRepo::create(&state.pool, &input, &slug).await?;
    UserPassionRepo::join(&state.pool, user.user_id, passion.id).await?;

    Ok((StatusCode::CREATED, Json(passion)))
}
