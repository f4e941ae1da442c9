//! Route definitions for the `/time-entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_entry;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(time_entry::list).post(time_entry::create))
}
