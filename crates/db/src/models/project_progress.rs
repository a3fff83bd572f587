//! Per-project requirement checklist progress.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectProgress {
    pub id: DbId,
    pub user_code: String,
    pub category_id: String,
    pub project_id: String,
    pub completed_requirements: Vec<String>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for toggling one requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequirement {
    pub requirement: String,
}
