//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
}
