//! Route definitions for the `/entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::entry;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entry::list).post(entry::create))
        .route(
            "/{id}",
            get(entry::get_by_id)
                .put(entry::update)
                .delete(entry::delete),
        )
}
