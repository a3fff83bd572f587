//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::handlers::{access_codes, admin_auth, content, reports};
use crate::state::AppState;

/// Routes mounted at `/admin`. Everything except `/login` requires an admin
/// token.
///
/// ```text
/// POST   /login                                            -> login (public)
///
/// GET    /access-codes                                     -> list
/// POST   /access-codes                                     -> create
/// POST   /access-codes/{id}/toggle                         -> toggle
/// PUT    /access-codes/{id}/active                         -> set_active
/// DELETE /access-codes/{id}                                -> delete
///
/// GET    /progress                                         -> list
/// GET    /progress/export                                  -> export_csv
///
/// POST   /courses                                          -> create_course
/// PATCH  /courses/{course_id}                              -> update_course
/// POST   /courses/{course_id}/sessions                     -> create_session
/// PATCH  /courses/{course_id}/sessions/{session_id}        -> update_session
///
/// POST   /categories                                       -> create_category
/// PATCH  /categories/{category_id}                         -> update_category
/// POST   /categories/{category_id}/projects                -> create_project
/// PATCH  /categories/{category_id}/projects/{project_id}   -> update_project
/// DELETE /categories/{category_id}/projects/{project_id}   -> delete_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_auth::login))
        // Access codes
        .route(
            "/access-codes",
            get(access_codes::list).post(access_codes::create),
        )
        .route("/access-codes/{id}", delete(access_codes::delete))
        .route("/access-codes/{id}/toggle", post(access_codes::toggle))
        .route("/access-codes/{id}/active", put(access_codes::set_active))
        // Progress reports
        .route("/progress", get(reports::list))
        .route("/progress/export", get(reports::export_csv))
        // Courses
        .route("/courses", post(content::create_course))
        .route("/courses/{course_id}", patch(content::update_course))
        .route(
            "/courses/{course_id}/sessions",
            post(content::create_session),
        )
        .route(
            "/courses/{course_id}/sessions/{session_id}",
            patch(content::update_session),
        )
        // Project categories and projects
        .route("/categories", post(content::create_category))
        .route("/categories/{category_id}", patch(content::update_category))
        .route(
            "/categories/{category_id}/projects",
            post(content::create_project),
        )
        .route(
            "/categories/{category_id}/projects/{project_id}",
            patch(content::update_project).delete(content::delete_project),
        )
}
