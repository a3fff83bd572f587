//! Learner context extractor.

use academy_core::error::CoreError;
use academy_core::gating::GateEntry;
use academy_core::roles::ROLE_LEARNER;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::gating::admit;
use crate::state::AppState;

/// An admitted learner, re-validated against the access registry on every
/// request.
///
/// A token whose code was deactivated or deleted since redemption is
/// rejected with `401 ACCESS_REVOKED`.
#[derive(Debug, Clone)]
pub struct Learner {
    /// The redeemed access code; key of every progress row.
    pub code: String,
    pub customer_name: String,
}

impl FromRequestParts<AppState> for Learner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_LEARNER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Learner access code required".into(),
            )));
        }

        let access = admit(&state.pool, &user.subject, GateEntry::Revalidation).await?;
        Ok(Learner {
            code: access.code,
            customer_name: access.customer_name,
        })
    }
}
