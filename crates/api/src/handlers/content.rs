//! Admin handlers for editing the content catalog.
//!
//! Updates are partial: only the fields present in the body change.

use academy_core::content::{
    generated_project_id, require_non_blank, validate_content_id, validate_difficulty,
};
use academy_core::error::CoreError;
use academy_core::validation::validate_input;
use academy_db::models::course::{CreateCourse, CreateSession, UpdateCourse, UpdateSession};
use academy_db::models::project::{
    CreateProject, CreateProjectCategory, UpdateProject, UpdateProjectCategory,
};
use academy_db::repositories::{CourseRepo, ProjectRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/courses
pub async fn create_course(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_content_id(&input.id)?;
    validate_input(&input)?;
    require_non_blank("title", &input.title)?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = %course.id, "Course created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PATCH /api/v1/admin/courses/{course_id}
pub async fn update_course(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(course_id): Path<String>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let course = CourseRepo::update(&state.pool, &course_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", &course_id))?;
    tracing::info!(%course_id, "Course updated");
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/admin/courses/{course_id}/sessions
pub async fn create_session(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(course_id): Path<String>,
    Json(input): Json<CreateSession>,
) -> AppResult<impl IntoResponse> {
    validate_content_id(&input.id)?;
    validate_input(&input)?;
    require_non_blank("title", &input.title)?;
    CourseRepo::find_by_id(&state.pool, &course_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", &course_id))?;

    let session = CourseRepo::create_session(&state.pool, &course_id, &input).await?;
    tracing::info!(%course_id, session_id = %session.id, "Session created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// PATCH /api/v1/admin/courses/{course_id}/sessions/{session_id}
pub async fn update_session(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((course_id, session_id)): Path<(String, String)>,
    Json(input): Json<UpdateSession>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let session = CourseRepo::update_session(&state.pool, &course_id, &session_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", format!("{course_id}/{session_id}")))?;
    tracing::info!(%course_id, %session_id, "Session updated");
    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProjectCategory>,
) -> AppResult<impl IntoResponse> {
    validate_content_id(&input.id)?;
    validate_input(&input)?;
    require_non_blank("title", &input.title)?;

    let category = ProjectRepo::create_category(&state.pool, &input).await?;
    tracing::info!(category_id = %category.id, "Project category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PATCH /api/v1/admin/categories/{category_id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(category_id): Path<String>,
    Json(input): Json<UpdateProjectCategory>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let category = ProjectRepo::update_category(&state.pool, &category_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("ProjectCategory", &category_id))?;
    tracing::info!(%category_id, "Project category updated");
    Ok(Json(DataResponse { data: category }))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/categories/{category_id}/projects
///
/// Without an explicit `id` the project gets a time-based one.
pub async fn create_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(category_id): Path<String>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    require_non_blank("title", &input.title)?;
    validate_difficulty(input.difficulty.as_deref())?;
    let id = match &input.id {
        Some(id) => {
            validate_content_id(id)?;
            id.clone()
        }
        None => generated_project_id(Utc::now()),
    };
    ProjectRepo::find_category(&state.pool, &category_id)
        .await?
        .ok_or_else(|| CoreError::not_found("ProjectCategory", &category_id))?;

    let project = ProjectRepo::create_project(&state.pool, &category_id, &id, &input).await?;
    tracing::info!(%category_id, project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PATCH /api/v1/admin/categories/{category_id}/projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((category_id, project_id)): Path<(String, String)>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    validate_difficulty(input.difficulty.as_deref())?;
    let project = ProjectRepo::update_project(&state.pool, &category_id, &project_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", format!("{category_id}/{project_id}")))?;
    tracing::info!(%category_id, %project_id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/categories/{category_id}/projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((category_id, project_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete_project(&state.pool, &category_id, &project_id).await? {
        tracing::info!(%category_id, %project_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Project", format!("{category_id}/{project_id}")).into())
    }
}
