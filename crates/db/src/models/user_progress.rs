//! Aggregate per-learner progress.

use academy_core::progress::SessionKey;
use academy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_progress` table. One row per access code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProgress {
    pub id: DbId,
    pub user_code: String,
    pub customer_name: String,
    pub last_activity: Timestamp,
    pub current_course: Option<String>,
    pub current_session: Option<String>,
    pub login_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `user_completed_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletedSession {
    pub user_code: String,
    pub course_id: String,
    pub session_id: String,
    pub completed_at: Timestamp,
}

impl CompletedSession {
    pub fn key(&self) -> SessionKey {
        SessionKey::new(self.course_id.clone(), self.session_id.clone())
    }
}

/// One tracked action against a learner's aggregate progress.
///
/// Absent course/session fields leave the stored values untouched.
#[derive(Debug, Clone)]
pub struct ActivityUpdate {
    pub user_code: String,
    pub customer_name: String,
    /// Whether this action increments `login_count`.
    pub counts_as_login: bool,
    pub current_course: Option<String>,
    pub current_session: Option<String>,
}
