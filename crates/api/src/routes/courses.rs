//! Route definitions for the `/courses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, progress};
use crate::state::AppState;

/// Routes mounted at `/courses`. All require a learner token.
///
/// ```text
/// GET  /                                                -> list_courses
/// GET  /{course_id}                                     -> get_course
/// GET  /{course_id}/sessions/{session_id}               -> get_session
/// GET  /{course_id}/sessions/{session_id}/progress      -> get_session_progress
/// POST /{course_id}/sessions/{session_id}/tasks/toggle  -> toggle_task
/// POST /{course_id}/sessions/{session_id}/complete      -> complete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_courses))
        .route("/{course_id}", get(catalog::get_course))
        .route(
            "/{course_id}/sessions/{session_id}",
            get(catalog::get_session),
        )
        .route(
            "/{course_id}/sessions/{session_id}/progress",
            get(progress::get_session_progress),
        )
        .route(
            "/{course_id}/sessions/{session_id}/tasks/toggle",
            post(progress::toggle_task),
        )
        .route(
            "/{course_id}/sessions/{session_id}/complete",
            post(progress::complete_session),
        )
}
