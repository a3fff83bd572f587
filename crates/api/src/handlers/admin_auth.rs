//! Handler for `POST /admin/login`.

use academy_core::error::CoreError;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_admin_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/v1/admin/login
///
/// Exchange the admin password for an admin token. The password is checked
/// against the Argon2 hash in server configuration.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<AdminLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let valid = verify_password(&input.password, &state.config.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        tracing::warn!("Rejected admin login");
        return Err(CoreError::Unauthorized("Invalid password".into()).into());
    }

    let token = generate_admin_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    tracing::info!("Admin logged in");

    Ok(Json(DataResponse {
        data: AdminLoginResponse {
            token,
            token_type: "Bearer",
            expires_in: state.config.jwt.admin_ttl_secs(),
        },
    }))
}
