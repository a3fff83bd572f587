//! Admin handlers for the `/admin/access-codes` resource.

use academy_core::access_code::validate_customer;
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::access_code::{CreateAccessCode, SetAccessCodeActive};
use academy_db::repositories::AccessCodeRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    CoreError::not_found("AccessCode", id).into()
}

/// GET /api/v1/admin/access-codes
///
/// Every issued code, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let codes = AccessCodeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: codes }))
}

/// POST /api/v1/admin/access-codes
///
/// Issue a new code for a customer. The code value is generated.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAccessCode>,
) -> AppResult<impl IntoResponse> {
    let (name, phone) = validate_customer(&input.customer_name, &input.customer_phone)?;
    let code = AccessCodeRepo::create_generated(&state.pool, &name, &phone).await?;
    tracing::info!(id = code.id, code = %code.code, "Access code issued");
    Ok((StatusCode::CREATED, Json(DataResponse { data: code })))
}

/// POST /api/v1/admin/access-codes/{id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let code = AccessCodeRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, is_active = code.is_active, "Access code toggled");
    Ok(Json(DataResponse { data: code }))
}

/// PUT /api/v1/admin/access-codes/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetAccessCodeActive>,
) -> AppResult<impl IntoResponse> {
    let code = AccessCodeRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, is_active = code.is_active, "Access code activation set");
    Ok(Json(DataResponse { data: code }))
}

/// DELETE /api/v1/admin/access-codes/{id}
///
/// Hard delete. The code's progress goes with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AccessCodeRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Access code deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
