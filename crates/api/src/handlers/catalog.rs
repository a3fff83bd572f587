//! Learner-facing catalog reads: courses with their sessions, and project
//! categories with their projects.

use academy_core::content::{navigation_for, SessionNavigation};
use academy_core::error::CoreError;
use academy_core::gating::{counts_as_login, GateEntry};
use academy_core::video::embed_url;
use academy_db::models::course::{CourseWithSessions, Session};
use academy_db::models::project::Project;
use academy_db::models::user_progress::ActivityUpdate;
use academy_db::repositories::{
    CourseRepo, ProjectProgressRepo, ProjectRepo, SessionProgressRepo, UserProgressRepo,
};
use academy_db::DbPool;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::progress::{ProjectProgressView, SessionProgressView};
use crate::error::AppResult;
use crate::middleware::learner::Learner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Everything the session page needs in one response.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub course_title: String,
    pub session: Session,
    /// Embeddable form of `session.video_url`.
    pub embed_url: Option<String>,
    #[serde(flatten)]
    pub navigation: SessionNavigation,
    pub progress: SessionProgressView,
}

/// A project with its embed URL and the learner's progress on it.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub embed_url: Option<String>,
    pub progress: ProjectProgressView,
}

// ---------------------------------------------------------------------------
// Lookups shared with the progress handlers
// ---------------------------------------------------------------------------

pub(crate) async fn load_course(pool: &DbPool, course_id: &str) -> AppResult<CourseWithSessions> {
    Ok(CourseRepo::find_with_sessions(pool, course_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", course_id))?)
}

pub(crate) async fn load_session(
    pool: &DbPool,
    course_id: &str,
    session_id: &str,
) -> AppResult<Session> {
    Ok(CourseRepo::find_session(pool, course_id, session_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", format!("{course_id}/{session_id}")))?)
}

pub(crate) async fn load_project(
    pool: &DbPool,
    category_id: &str,
    project_id: &str,
) -> AppResult<Project> {
    Ok(ProjectRepo::find_project(pool, category_id, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", format!("{category_id}/{project_id}")))?)
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// All courses with their sessions in display order.
pub async fn list_courses(
    State(state): State<AppState>,
    _learner: Learner,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_with_sessions(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    _learner: Learner,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state.pool, &course_id).await?;
    Ok(Json(DataResponse { data: course }))
}

/// GET /api/v1/courses/{course_id}/sessions/{session_id}
///
/// Session content with previous/next navigation and the learner's task
/// progress. Opening a session records it as the learner's current
/// position.
pub async fn get_session(
    State(state): State<AppState>,
    learner: Learner,
    Path((course_id, session_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state.pool, &course_id).await?;
    let navigation = navigation_for(&course.session_ids(), &session_id)
        .ok_or_else(|| CoreError::not_found("Session", format!("{course_id}/{session_id}")))?;
    let session = course.sessions[navigation.index].clone();

    UserProgressRepo::record_activity(
        &state.pool,
        &ActivityUpdate {
            user_code: learner.code.clone(),
            customer_name: learner.customer_name.clone(),
            counts_as_login: counts_as_login(GateEntry::Revalidation),
            current_course: Some(course_id.clone()),
            current_session: Some(session_id.clone()),
        },
    )
    .await?;

    let progress =
        SessionProgressRepo::find(&state.pool, &learner.code, &course_id, &session_id).await?;

    Ok(Json(DataResponse {
        data: SessionDetail {
            course_title: course.course.title,
            embed_url: session.video_url.as_deref().map(embed_url),
            progress: SessionProgressView::new(&session, progress),
            navigation,
            session,
        },
    }))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// All project categories with their projects.
pub async fn list_projects(
    State(state): State<AppState>,
    _learner: Learner,
) -> AppResult<impl IntoResponse> {
    let categories = ProjectRepo::list_with_projects(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/projects/{category_id}/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    learner: Learner,
    Path((category_id, project_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state.pool, &category_id, &project_id).await?;
    let progress =
        ProjectProgressRepo::find(&state.pool, &learner.code, &category_id, &project_id).await?;

    Ok(Json(DataResponse {
        data: ProjectDetail {
            embed_url: project.video_url.as_deref().map(embed_url),
            progress: ProjectProgressView::new(&project, progress),
            project,
        },
    }))
}
