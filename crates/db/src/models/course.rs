//! Course and session entity models and DTOs.

use academy_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `sessions` table. Ordered within a course by
/// `(order_index, id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub assignment: String,
    pub tasks: Vec<String>,
    pub video_url: Option<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A course with its sessions embedded in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CourseWithSessions {
    #[serde(flatten)]
    pub course: Course,
    pub sessions: Vec<Session>,
}

impl CourseWithSessions {
    /// Session ids in display order.
    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn find_session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }
}

/// DTO for creating a course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// DTO for patching a course. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// DTO for adding a session to a course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSession {
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub assignment: Option<String>,
    pub tasks: Option<Vec<String>>,
    pub video_url: Option<String>,
    /// Defaults to one past the course's current last session.
    #[validate(range(min = 0))]
    pub order_index: Option<i32>,
}

/// DTO for patching a session. Only non-`None` fields are applied; an empty
/// `video_url` clears the video.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSession {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub assignment: Option<String>,
    pub tasks: Option<Vec<String>>,
    pub video_url: Option<String>,
    #[validate(range(min = 0))]
    pub order_index: Option<i32>,
}
