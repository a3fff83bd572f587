//! Repository for the `session_progress` table.

use academy_core::progress::toggle_member;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::session_progress::SessionProgress;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_code, course_id, session_id, completed_tasks, is_completed, \
    created_at, updated_at";

/// Provides per-session progress operations.
pub struct SessionProgressRepo;

impl SessionProgressRepo {
    /// Find one learner's progress on one session.
    pub async fn find(
        pool: &PgPool,
        user_code: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_progress \
             WHERE user_code = $1 AND course_id = $2 AND session_id = $3"
        );
        sqlx::query_as::<_, SessionProgress>(&query)
            .bind(user_code)
            .bind(course_id)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip one task in the learner's checklist. Never touches `is_completed`.
    ///
    /// The row is created if absent and locked with `FOR UPDATE` before the
    /// toggle, so concurrent toggles on the same session serialize.
    pub async fn toggle_task(
        pool: &PgPool,
        user_code: &str,
        course_id: &str,
        session_id: &str,
        task: &str,
    ) -> Result<SessionProgress, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut row = Self::lock_or_create(&mut tx, user_code, course_id, session_id).await?;
        toggle_member(&mut row.completed_tasks, task);

        let query = format!(
            "UPDATE session_progress SET completed_tasks = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SessionProgress>(&query)
            .bind(row.id)
            .bind(&row.completed_tasks)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Mark a session complete and record it in the learner's aggregate
    /// progress, in one transaction.
    ///
    /// Completion is unconditional: the task checklist is left as is. The
    /// aggregate row is created if absent and the completed pair is inserted
    /// with `ON CONFLICT DO NOTHING`, so repeat calls add nothing.
    pub async fn complete_session(
        pool: &PgPool,
        user_code: &str,
        customer_name: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<SessionProgress, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO session_progress (user_code, course_id, session_id, is_completed) \
             VALUES ($1, $2, $3, true) \
             ON CONFLICT (user_code, course_id, session_id) DO UPDATE \
             SET is_completed = true \
             RETURNING {COLUMNS}"
        );
        let progress = sqlx::query_as::<_, SessionProgress>(&query)
            .bind(user_code)
            .bind(course_id)
            .bind(session_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO user_progress (user_code, customer_name) VALUES ($1, $2) \
             ON CONFLICT (user_code) DO UPDATE SET last_activity = NOW()",
        )
        .bind(user_code)
        .bind(customer_name)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO user_completed_sessions (user_code, course_id, session_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_code, course_id, session_id) DO NOTHING",
        )
        .bind(user_code)
        .bind(course_id)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(progress)
    }

    /// Ensure the row exists, then lock and return it.
    async fn lock_or_create(
        tx: &mut Transaction<'_, Postgres>,
        user_code: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<SessionProgress, sqlx::Error> {
        sqlx::query(
            "INSERT INTO session_progress (user_code, course_id, session_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_code, course_id, session_id) DO NOTHING",
        )
        .bind(user_code)
        .bind(course_id)
        .bind(session_id)
        .execute(&mut **tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM session_progress \
             WHERE user_code = $1 AND course_id = $2 AND session_id = $3 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, SessionProgress>(&query)
            .bind(user_code)
            .bind(course_id)
            .bind(session_id)
            .fetch_one(&mut **tx)
            .await
    }
}
