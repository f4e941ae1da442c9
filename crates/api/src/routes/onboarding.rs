//! Route definitions for the onboarding import.

use axum::routing::post;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/import", post(onboarding::import))
}
