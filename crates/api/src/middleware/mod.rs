//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`learner::Learner`] -- Requires a learner token whose code still unlocks the platform.

pub mod auth;
pub mod learner;
pub mod rbac;
