//! Route definitions for the `/milestones` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(milestone::list).post(milestone::create))
        .route(
            "/{id}",
            get(milestone::get_by_id)
                .put(milestone::update)
                .delete(milestone::delete),
        )
}
