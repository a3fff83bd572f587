//! Handlers for the `/access` resource (code redemption, learner session).

use academy_core::gating::GateEntry;
use academy_core::types::Timestamp;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_learner_token;
use crate::error::{AppError, AppResult};
use crate::gating::{admit, record_visit};
use crate::middleware::learner::Learner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /access/redeem`.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    #[serde(default)]
    pub code: String,
}

/// Successful redemption: a learner token bound to the code.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub access_code: String,
    pub customer_name: String,
}

/// The current learner as seen by `GET /access/session`.
#[derive(Debug, Serialize)]
pub struct LearnerSession {
    pub access_code: String,
    pub customer_name: String,
    pub login_count: i32,
    pub last_activity: Timestamp,
    pub current_course: Option<String>,
    pub current_session: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/access/redeem
///
/// Redeem an access code. Counts as a login.
pub async fn redeem(
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<impl IntoResponse> {
    let access = admit(&state.pool, &input.code, GateEntry::Redemption).await?;

    let token = generate_learner_token(&access.code, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(DataResponse {
        data: RedeemResponse {
            token,
            token_type: "Bearer",
            expires_in: state.config.jwt.learner_ttl_secs(),
            access_code: access.code,
            customer_name: access.customer_name,
        },
    }))
}

/// GET /api/v1/access/session
///
/// Re-validate the stored code and return the learner context. Touches
/// `last_activity` without counting a login.
pub async fn session(
    State(state): State<AppState>,
    learner: Learner,
) -> AppResult<impl IntoResponse> {
    let progress = record_visit(
        &state.pool,
        &learner.code,
        &learner.customer_name,
        GateEntry::Revalidation,
    )
    .await?;

    Ok(Json(DataResponse {
        data: LearnerSession {
            access_code: learner.code,
            customer_name: learner.customer_name,
            login_count: progress.login_count,
            last_activity: progress.last_activity,
            current_course: progress.current_course,
            current_session: progress.current_session,
        },
    }))
}
