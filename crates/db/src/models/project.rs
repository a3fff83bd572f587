//! Project category and project entity models and DTOs.

use academy_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `project_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub technologies: Vec<String>,
    pub requirements: Vec<String>,
    pub instructions: String,
    pub demo_url: Option<String>,
    pub source_code: Option<String>,
    pub video_url: Option<String>,
    pub estimated_time: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with its projects embedded.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithProjects {
    #[serde(flatten)]
    pub category: ProjectCategory,
    pub projects: Vec<Project>,
}

/// DTO for creating a project category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectCategory {
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// DTO for patching a project category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProjectCategory {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// DTO for creating a project inside a category.
///
/// `id` is generated from the current time when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub demo_url: Option<String>,
    pub source_code: Option<String>,
    pub video_url: Option<String>,
    pub estimated_time: Option<String>,
}

/// DTO for patching a project. Only non-`None` fields are applied; empty
/// link fields clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub demo_url: Option<String>,
    pub source_code: Option<String>,
    pub video_url: Option<String>,
    pub estimated_time: Option<String>,
}
