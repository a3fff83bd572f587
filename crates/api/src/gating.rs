//! The single gate every learner request passes through.
//!
//! [`admit`] looks the presented code up, applies the predicate from
//! `academy_core::gating`, and for explicit redemption records the visit.
//! Both the redemption handler and the [`Learner`](crate::middleware::learner::Learner)
//! extractor call it, so the rules cannot drift apart.

use academy_core::access_code::normalize_code;
use academy_core::error::CoreError;
use academy_core::gating::{check_access, counts_as_login, GateEntry, EMPTY_CODE_MESSAGE};
use academy_db::models::access_code::AccessCode;
use academy_db::models::user_progress::{ActivityUpdate, UserProgress};
use academy_db::repositories::{AccessCodeRepo, UserProgressRepo};
use academy_db::DbPool;

use crate::error::{AppError, AppResult};

/// Admit `raw_code` through the gate.
///
/// On [`GateEntry::Redemption`] blank input is a validation error, a denial
/// is reported as [`AppError::AccessDenied`], and success stamps
/// `last_access` and records a login. On [`GateEntry::Revalidation`] a
/// denial is [`AppError::AccessRevoked`] and nothing is written.
pub async fn admit(pool: &DbPool, raw_code: &str, entry: GateEntry) -> AppResult<AccessCode> {
    let code = normalize_code(raw_code);
    if code.is_empty() {
        return Err(CoreError::Validation(EMPTY_CODE_MESSAGE.into()).into());
    }

    let found = AccessCodeRepo::find_by_code(pool, &code).await?;
    if let Err(denial) = check_access(found.as_ref().map(|c| c.is_active)) {
        tracing::warn!(code = %code, reason = %denial, ?entry, "Access code refused");
        return Err(match entry {
            GateEntry::Redemption => AppError::AccessDenied(denial),
            GateEntry::Revalidation => AppError::AccessRevoked(denial),
        });
    }
    // check_access only passes for an existing record.
    let access = found.ok_or_else(|| AppError::InternalError("Admitted missing code".into()))?;

    if entry == GateEntry::Redemption {
        let access = AccessCodeRepo::stamp_last_access(pool, access.id)
            .await?
            .ok_or_else(|| CoreError::not_found("AccessCode", access.id))?;
        record_visit(pool, &access.code, &access.customer_name, entry).await?;
        tracing::info!(code = %access.code, "Access code redeemed");
        return Ok(access);
    }

    Ok(access)
}

/// Touch the learner's aggregate progress row, counting a login only when
/// the login policy says `entry` is one.
pub async fn record_visit(
    pool: &DbPool,
    code: &str,
    customer_name: &str,
    entry: GateEntry,
) -> AppResult<UserProgress> {
    let update = ActivityUpdate {
        user_code: code.to_string(),
        customer_name: customer_name.to_string(),
        counts_as_login: counts_as_login(entry),
        current_course: None,
        current_session: None,
    };
    Ok(UserProgressRepo::record_activity(pool, &update).await?)
}
