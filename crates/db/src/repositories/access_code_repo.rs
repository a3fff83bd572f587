//! Repository for the `access_codes` table.

use academy_core::access_code::{generate_access_code, MAX_GENERATION_ATTEMPTS};
use academy_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::access_code::AccessCode;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, customer_name, customer_phone, is_active, last_access, created_at";

/// Name of the unique constraint on `access_codes.code`.
const CODE_CONSTRAINT: &str = "uq_access_codes_code";

/// Provides CRUD operations for access codes.
pub struct AccessCodeRepo;

impl AccessCodeRepo {
    /// Insert a code with an explicit value. Active by default.
    pub async fn create(
        pool: &PgPool,
        code: &str,
        customer_name: &str,
        customer_phone: &str,
    ) -> Result<AccessCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_codes (code, customer_name, customer_phone, is_active) \
             VALUES ($1, $2, $3, true) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(code)
            .bind(customer_name)
            .bind(customer_phone)
            .fetch_one(pool)
            .await
    }

    /// Issue a code with a freshly generated value.
    pub async fn create_generated(
        pool: &PgPool,
        customer_name: &str,
        customer_phone: &str,
    ) -> Result<AccessCode, sqlx::Error> {
        Self::create_with(pool, customer_name, customer_phone, generate_access_code).await
    }

    /// Issue a code drawn from `generate`.
    ///
    /// A collision with an existing code is retried with a new draw, up to
    /// [`MAX_GENERATION_ATTEMPTS`] times; the last error is returned after that.
    pub async fn create_with(
        pool: &PgPool,
        customer_name: &str,
        customer_phone: &str,
        mut generate: impl FnMut() -> String,
    ) -> Result<AccessCode, sqlx::Error> {
        let mut attempt = 1;
        loop {
            let code = generate();
            match Self::create(pool, &code, customer_name, customer_phone).await {
                Err(e) if attempt < MAX_GENERATION_ATTEMPTS && is_unique_violation(&e, CODE_CONSTRAINT) => {
                    tracing::warn!(attempt, "Generated access code collided, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Find an access code by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AccessCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_codes WHERE id = $1");
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-match lookup by code value. Callers normalise the input first.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<AccessCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_codes WHERE code = $1");
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List every code, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AccessCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_codes ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, AccessCode>(&query).fetch_all(pool).await
    }

    /// Set the active flag. Returns `None` if no row with the given `id` exists.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<AccessCode>, sqlx::Error> {
        let query = format!(
            "UPDATE access_codes SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Flip the active flag in place.
    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<AccessCode>, sqlx::Error> {
        let query = format!(
            "UPDATE access_codes SET is_active = NOT is_active WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful redemption time.
    pub async fn stamp_last_access(pool: &PgPool, id: DbId) -> Result<Option<AccessCode>, sqlx::Error> {
        let query = format!(
            "UPDATE access_codes SET last_access = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a code. Progress rows keyed by it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM access_codes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
