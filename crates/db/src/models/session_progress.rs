//! Per-session task checklist progress.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `session_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionProgress {
    pub id: DbId,
    pub user_code: String,
    pub course_id: String,
    pub session_id: String,
    pub completed_tasks: Vec<String>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for toggling one task.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleTask {
    pub task: String,
}
