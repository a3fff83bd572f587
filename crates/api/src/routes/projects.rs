//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, progress};
use crate::state::AppState;

/// Routes mounted at `/projects`. All require a learner token.
///
/// ```text
/// GET  /                                                 -> list_projects
/// GET  /{category_id}/{project_id}                       -> get_project
/// GET  /{category_id}/{project_id}/progress              -> get_project_progress
/// POST /{category_id}/{project_id}/requirements/toggle   -> toggle_requirement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_projects))
        .route("/{category_id}/{project_id}", get(catalog::get_project))
        .route(
            "/{category_id}/{project_id}/progress",
            get(progress::get_project_progress),
        )
        .route(
            "/{category_id}/{project_id}/requirements/toggle",
            post(progress::toggle_requirement),
        )
}
