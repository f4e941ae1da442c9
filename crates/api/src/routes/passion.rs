//! Route definitions for the passion taxonomy and the caller's
//! memberships.

use axum::routing::get;
use axum::Router;

use crate::handlers::{passion, user_passion};
use crate::state::AppState;

/// Routes mounted at `/passions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(passion::list).post(passion::create))
}

/// Routes mounted at `/user/passions`.
pub fn membership_router() -> Router<AppState> {
    Router::new()
        .route("/", get(user_passion::list).post(user_passion::join))
        .route("/{passion_id}", axum::routing::delete(user_passion::leave))
}
