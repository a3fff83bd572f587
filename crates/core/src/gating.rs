//! Access gating: the predicate that decides whether a presented code
//! unlocks the platform, and the policy for counting logins.
//!
//! Evaluation is pure; callers look the code up and pass in what they found.

/// Message shown when explicit redemption is attempted with blank input.
pub const EMPTY_CODE_MESSAGE: &str = "Please enter an access code";

/// Why a presented access code was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenial {
    /// No access code with that value exists.
    #[error("Invalid access code")]
    Invalid,
    /// The code exists but an administrator deactivated it.
    #[error("This access code has been deactivated")]
    Deactivated,
}

impl AccessDenial {
    /// Stable machine-readable code for API error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid => "INVALID_ACCESS_CODE",
            Self::Deactivated => "ACCESS_CODE_DEACTIVATED",
        }
    }
}

/// How a learner arrived at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEntry {
    /// The learner typed a code into the redemption form.
    Redemption,
    /// A previously redeemed code is being re-checked on a protected request.
    Revalidation,
}

/// Evaluate the gating predicate.
///
/// `is_active` is `None` when the lookup found no record, otherwise the
/// record's active flag. Access is granted only for an existing, active code.
pub fn check_access(is_active: Option<bool>) -> Result<(), AccessDenial> {
    match is_active {
        None => Err(AccessDenial::Invalid),
        Some(false) => Err(AccessDenial::Deactivated),
        Some(true) => Ok(()),
    }
}

/// Whether passing the gate via `entry` increments the learner's login count.
///
/// Only explicit redemption counts; revalidation of a stored code is not a
/// new login.
pub fn counts_as_login(entry: GateEntry) -> bool {
    matches!(entry, GateEntry::Redemption)
}
