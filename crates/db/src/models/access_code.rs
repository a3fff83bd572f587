//! Access code entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `access_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessCode {
    pub id: DbId,
    pub code: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub is_active: bool,
    pub last_access: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for issuing a new access code. The code itself is generated.
///
/// Fields are trimmed and checked by `academy_core::access_code::validate_customer`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccessCode {
    pub customer_name: String,
    pub customer_phone: String,
}

/// DTO for explicitly setting the active flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SetAccessCodeActive {
    pub is_active: bool,
}
