//! Repository for the `project_progress` table.

use academy_core::progress::{requirements_complete, retain_current, toggle_member};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::project_progress::ProjectProgress;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_code, category_id, project_id, completed_requirements, \
    is_completed, created_at, updated_at";

/// Provides per-project progress operations.
pub struct ProjectProgressRepo;

impl ProjectProgressRepo {
    /// Find one learner's progress on one project.
    pub async fn find(
        pool: &PgPool,
        user_code: &str,
        category_id: &str,
        project_id: &str,
    ) -> Result<Option<ProjectProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_progress \
             WHERE user_code = $1 AND category_id = $2 AND project_id = $3"
        );
        sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(user_code)
            .bind(category_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// All project progress rows of one learner.
    pub async fn list_for_user(
        pool: &PgPool,
        user_code: &str,
    ) -> Result<Vec<ProjectProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_progress \
             WHERE user_code = $1 \
             ORDER BY category_id, project_id"
        );
        sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(user_code)
            .fetch_all(pool)
            .await
    }

    /// Flip one requirement and recompute completion.
    ///
    /// Ticked entries that are no longer among `requirements` are dropped,
    /// and `is_completed` becomes true exactly when every one of
    /// `requirements` is ticked. The row is locked for the duration of the
    /// toggle.
    pub async fn toggle_requirement(
        pool: &PgPool,
        user_code: &str,
        category_id: &str,
        project_id: &str,
        requirement: &str,
        requirements: &[String],
    ) -> Result<ProjectProgress, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut row = Self::lock_or_create(&mut tx, user_code, category_id, project_id).await?;
        toggle_member(&mut row.completed_requirements, requirement);
        retain_current(&mut row.completed_requirements, requirements);
        let is_completed = requirements_complete(&row.completed_requirements, requirements);

        let query = format!(
            "UPDATE project_progress \
             SET completed_requirements = $2, is_completed = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(row.id)
            .bind(&row.completed_requirements)
            .bind(is_completed)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Ensure the row exists, then lock and return it.
    async fn lock_or_create(
        tx: &mut Transaction<'_, Postgres>,
        user_code: &str,
        category_id: &str,
        project_id: &str,
    ) -> Result<ProjectProgress, sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_progress (user_code, category_id, project_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_code, category_id, project_id) DO NOTHING",
        )
        .bind(user_code)
        .bind(category_id)
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM project_progress \
             WHERE user_code = $1 AND category_id = $2 AND project_id = $3 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(user_code)
            .bind(category_id)
            .bind(project_id)
            .fetch_one(&mut **tx)
            .await
    }
}
