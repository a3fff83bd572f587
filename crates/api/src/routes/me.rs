//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /dashboard  -> dashboard (learner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard::dashboard))
}
