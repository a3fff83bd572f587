//! Repository for the `project_categories` and `projects` tables.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::models::project::{
    CategoryWithProjects, CreateProject, CreateProjectCategory, Project, ProjectCategory,
    UpdateProject, UpdateProjectCategory,
};

/// Column list for `project_categories`.
const CATEGORY_COLUMNS: &str = "id, title, description, icon, created_at, updated_at";

/// Column list for `projects`.
const PROJECT_COLUMNS: &str = "id, category_id, title, description, difficulty, technologies, \
    requirements, instructions, demo_url, source_code, video_url, estimated_time, \
    created_at, updated_at";

/// Provides catalog operations for project categories and projects.
pub struct ProjectRepo;

impl ProjectRepo {
    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    /// All categories with their projects, oldest first.
    pub async fn list_with_projects(
        pool: &PgPool,
    ) -> Result<Vec<CategoryWithProjects>, sqlx::Error> {
        let query =
            format!("SELECT {CATEGORY_COLUMNS} FROM project_categories ORDER BY created_at, id");
        let categories = sqlx::query_as::<_, ProjectCategory>(&query)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY category_id, created_at, id"
        );
        let projects = sqlx::query_as::<_, Project>(&query).fetch_all(pool).await?;

        let mut by_category: HashMap<String, Vec<Project>> = HashMap::new();
        for project in projects {
            by_category
                .entry(project.category_id.clone())
                .or_default()
                .push(project);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let projects = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithProjects { category, projects }
            })
            .collect())
    }

    /// Find a category by id.
    pub async fn find_category(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<ProjectCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM project_categories WHERE id = $1");
        sqlx::query_as::<_, ProjectCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create an empty category.
    pub async fn create_category(
        pool: &PgPool,
        input: &CreateProjectCategory,
    ) -> Result<ProjectCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_categories (id, title, description, icon) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '')) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCategory>(&query)
            .bind(&input.id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Patch a category. Only non-`None` fields in `input` are applied.
    pub async fn update_category(
        pool: &PgPool,
        id: &str,
        input: &UpdateProjectCategory,
    ) -> Result<Option<ProjectCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE project_categories SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                icon = COALESCE($4, icon) \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCategory>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Find one project of one category.
    pub async fn find_project(
        pool: &PgPool,
        category_id: &str,
        project_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE category_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a project under `id`, which the caller has already resolved.
    ///
    /// A missing category surfaces as an `fk_projects_category` violation.
    pub async fn create_project(
        pool: &PgPool,
        category_id: &str,
        id: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                (id, category_id, title, description, difficulty, technologies, requirements, \
                 instructions, demo_url, source_code, video_url, estimated_time) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, 'Beginner'), \
                COALESCE($6, '{{}}'::TEXT[]), COALESCE($7, '{{}}'::TEXT[]), COALESCE($8, ''), \
                NULLIF($9, ''), NULLIF($10, ''), NULLIF($11, ''), COALESCE($12, '')) \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(&input.technologies)
            .bind(&input.requirements)
            .bind(&input.instructions)
            .bind(&input.demo_url)
            .bind(&input.source_code)
            .bind(&input.video_url)
            .bind(&input.estimated_time)
            .fetch_one(pool)
            .await
    }

    /// Patch a project. Only non-`None` fields are applied; an empty string
    /// clears a link field.
    pub async fn update_project(
        pool: &PgPool,
        category_id: &str,
        project_id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                difficulty = COALESCE($5, difficulty), \
                technologies = COALESCE($6, technologies), \
                requirements = COALESCE($7, requirements), \
                instructions = COALESCE($8, instructions), \
                demo_url = CASE WHEN $9::TEXT IS NULL THEN demo_url ELSE NULLIF($9, '') END, \
                source_code = CASE WHEN $10::TEXT IS NULL THEN source_code ELSE NULLIF($10, '') END, \
                video_url = CASE WHEN $11::TEXT IS NULL THEN video_url ELSE NULLIF($11, '') END, \
                estimated_time = COALESCE($12, estimated_time) \
             WHERE category_id = $1 AND id = $2 \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category_id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(&input.technologies)
            .bind(&input.requirements)
            .bind(&input.instructions)
            .bind(&input.demo_url)
            .bind(&input.source_code)
            .bind(&input.video_url)
            .bind(&input.estimated_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project together with every learner's progress on it.
    /// Returns `true` if the project existed.
    pub async fn delete_project(
        pool: &PgPool,
        category_id: &str,
        project_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_progress WHERE category_id = $1 AND project_id = $2")
            .bind(category_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE category_id = $1 AND id = $2")
            .bind(category_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
