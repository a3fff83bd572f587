//! Route definitions for the `/access` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Routes mounted at `/access`.
///
/// ```text
/// POST /redeem   -> redeem (public)
/// GET  /session  -> session (learner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/redeem", post(access::redeem))
        .route("/session", get(access::session))
}
