//! Repository for the `user_progress` and `user_completed_sessions` tables.

use sqlx::PgPool;

use crate::models::user_progress::{ActivityUpdate, CompletedSession, UserProgress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_code, customer_name, last_activity, current_course, \
    current_session, login_count, created_at, updated_at";

/// Column list for `user_completed_sessions`.
const COMPLETED_COLUMNS: &str = "user_code, course_id, session_id, completed_at";

/// Provides aggregate progress operations keyed by access code.
pub struct UserProgressRepo;

impl UserProgressRepo {
    /// Find a learner's aggregate progress. `None` until the first tracked action.
    pub async fn find_by_user_code(
        pool: &PgPool,
        user_code: &str,
    ) -> Result<Option<UserProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_progress WHERE user_code = $1");
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_code)
            .fetch_optional(pool)
            .await
    }

    /// List progress rows, most recently active first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_progress \
             ORDER BY last_activity DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every progress row, most recently active first. Used by the export.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<UserProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_progress ORDER BY last_activity DESC, id DESC"
        );
        sqlx::query_as::<_, UserProgress>(&query).fetch_all(pool).await
    }

    /// Record one tracked action, creating the row on first contact.
    ///
    /// Uses `ON CONFLICT (user_code) DO UPDATE` so the increment of
    /// `login_count` happens atomically in the database rather than as a
    /// read-modify-write.
    pub async fn record_activity(
        pool: &PgPool,
        update: &ActivityUpdate,
    ) -> Result<UserProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_progress \
                (user_code, customer_name, login_count, current_course, current_session) \
             VALUES ($1, $2, CASE WHEN $3 THEN 1 ELSE 0 END, $4, $5) \
             ON CONFLICT (user_code) DO UPDATE SET \
                last_activity = NOW(), \
                login_count = user_progress.login_count + CASE WHEN $3 THEN 1 ELSE 0 END, \
                current_course = COALESCE(EXCLUDED.current_course, user_progress.current_course), \
                current_session = COALESCE(EXCLUDED.current_session, user_progress.current_session) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(&update.user_code)
            .bind(&update.customer_name)
            .bind(update.counts_as_login)
            .bind(&update.current_course)
            .bind(&update.current_session)
            .fetch_one(pool)
            .await
    }

    /// Completed sessions of one learner, in completion order.
    pub async fn completed_sessions(
        pool: &PgPool,
        user_code: &str,
    ) -> Result<Vec<CompletedSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETED_COLUMNS} FROM user_completed_sessions \
             WHERE user_code = $1 \
             ORDER BY completed_at, id"
        );
        sqlx::query_as::<_, CompletedSession>(&query)
            .bind(user_code)
            .fetch_all(pool)
            .await
    }

    /// Completed sessions of several learners at once, for admin listings.
    pub async fn completed_sessions_for(
        pool: &PgPool,
        user_codes: &[String],
    ) -> Result<Vec<CompletedSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETED_COLUMNS} FROM user_completed_sessions \
             WHERE user_code = ANY($1) \
             ORDER BY user_code, completed_at, id"
        );
        sqlx::query_as::<_, CompletedSession>(&query)
            .bind(user_codes)
            .fetch_all(pool)
            .await
    }
}
