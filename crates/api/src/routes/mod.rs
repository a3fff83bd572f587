pub mod access;
pub mod admin;
pub mod courses;
pub mod health;
pub mod me;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /access/redeem                                    redeem a code (public)
/// /access/session                                   current learner
///
/// /courses                                          catalog, sessions, task progress
/// /projects                                         catalog, requirement progress
/// /me/dashboard                                     learner dashboard
///
/// /admin/login                                      admin login (public)
/// /admin/access-codes                               access registry
/// /admin/progress                                   progress table, CSV export
/// /admin/courses, /admin/categories                 content editing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/access", access::router())
        .nest("/courses", courses::router())
        .nest("/projects", projects::router())
        .nest("/me", me::router())
        .nest("/admin", admin::router())
}
