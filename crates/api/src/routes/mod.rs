//! Route modules, one per resource.

pub mod auth;
pub mod entry;
pub mod health;
pub mod milestone;
pub mod onboarding;
pub mod passion;
pub mod profile;
pub mod project;
pub mod task;
pub mod time_entry;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                  signup (public)
/// /auth/login                   login (public)
/// /auth/refresh                 refresh (public)
/// /auth/logout                  logout (requires auth)
///
/// /profile                      get, update own profile
///
/// /passions                     list, create custom
/// /user/passions                list joined, join
/// /user/passions/{passion_id}   leave
///
/// /projects                     list, create
/// /projects/{id}                get, update, delete (cascades)
///
/// /milestones                   list (+progress), create
/// /milestones/{id}              get (+progress), update, delete (cascade)
///
/// /tasks                        list, create
/// /tasks/{id}                   get, update, delete
///
/// /entries                      list, create
/// /entries/{id}                 get, update, delete
///
/// /time-entries                 list (+total), create
///
/// /onboarding/import            batch import (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/passions", passion::router())
        .nest("/user/passions", passion::membership_router())
        .nest("/projects", project::router())
        .nest("/milestones", milestone::router())
        .nest("/tasks", task::router())
        .nest("/entries", entry::router())
        .nest("/time-entries", time_entry::router())
        .nest("/onboarding", onboarding::router())
}
