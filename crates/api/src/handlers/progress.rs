//! Handlers for learner progress: session task checklists, session
//! completion, and project requirement checklists.

use academy_core::error::CoreError;
use academy_core::progress::{
    course_percentage, percentage, requirements_complete, retain_current, SessionKey,
};
use academy_db::models::course::Session;
use academy_db::models::project::Project;
use academy_db::models::project_progress::{ProjectProgress, ToggleRequirement};
use academy_db::models::session_progress::{SessionProgress, ToggleTask};
use academy_db::repositories::{ProjectProgressRepo, SessionProgressRepo, UserProgressRepo};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::catalog::{load_course, load_project, load_session};
use crate::error::AppResult;
use crate::middleware::learner::Learner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A learner's checklist state for one session. Absent rows read as empty.
#[derive(Debug, Serialize)]
pub struct SessionProgressView {
    pub course_id: String,
    pub session_id: String,
    pub completed_tasks: Vec<String>,
    pub total_tasks: usize,
    pub task_percent: i32,
    pub is_completed: bool,
}

impl SessionProgressView {
    pub fn new(session: &Session, progress: Option<SessionProgress>) -> Self {
        let (completed_tasks, is_completed) = progress
            .map(|p| (p.completed_tasks, p.is_completed))
            .unwrap_or_default();
        Self {
            course_id: session.course_id.clone(),
            session_id: session.id.clone(),
            task_percent: percentage(completed_tasks.len(), session.tasks.len()),
            total_tasks: session.tasks.len(),
            completed_tasks,
            is_completed,
        }
    }
}

/// A learner's requirement checklist for one project.
#[derive(Debug, Serialize)]
pub struct ProjectProgressView {
    pub category_id: String,
    pub project_id: String,
    pub completed_requirements: Vec<String>,
    pub total_requirements: usize,
    pub requirement_percent: i32,
    pub is_completed: bool,
}

impl ProjectProgressView {
    pub fn new(project: &Project, progress: Option<ProjectProgress>) -> Self {
        let (mut completed_requirements, is_completed) = progress
            .map(|p| (p.completed_requirements, p.is_completed))
            .unwrap_or_default();
        retain_current(&mut completed_requirements, &project.requirements);
        let is_completed =
            is_completed && requirements_complete(&completed_requirements, &project.requirements);
        Self {
            category_id: project.category_id.clone(),
            project_id: project.id.clone(),
            requirement_percent: percentage(
                completed_requirements.len(),
                project.requirements.len(),
            ),
            total_requirements: project.requirements.len(),
            completed_requirements,
            is_completed,
        }
    }
}

/// Result of marking a session complete.
#[derive(Debug, Serialize)]
pub struct SessionCompletion {
    pub progress: SessionProgressView,
    /// Legacy `"<course>-<session>"` identifiers of every completed session.
    pub completed_sessions: Vec<String>,
    pub completed_session_keys: Vec<SessionKey>,
    /// Completion percentage of the session's course.
    pub course_percent: i32,
}

// ---------------------------------------------------------------------------
// Session progress
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{course_id}/sessions/{session_id}/progress
pub async fn get_session_progress(
    State(state): State<AppState>,
    learner: Learner,
    Path((course_id, session_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state.pool, &course_id, &session_id).await?;
    let progress =
        SessionProgressRepo::find(&state.pool, &learner.code, &course_id, &session_id).await?;
    Ok(Json(DataResponse {
        data: SessionProgressView::new(&session, progress),
    }))
}

/// POST /api/v1/courses/{course_id}/sessions/{session_id}/tasks/toggle
///
/// Tick or untick one task. Never completes the session.
pub async fn toggle_task(
    State(state): State<AppState>,
    learner: Learner,
    Path((course_id, session_id)): Path<(String, String)>,
    Json(input): Json<ToggleTask>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state.pool, &course_id, &session_id).await?;
    if !session.tasks.contains(&input.task) {
        return Err(CoreError::Validation(format!(
            "Task '{}' is not part of session '{session_id}'",
            input.task
        ))
        .into());
    }

    let progress = SessionProgressRepo::toggle_task(
        &state.pool,
        &learner.code,
        &course_id,
        &session_id,
        &input.task,
    )
    .await?;

    Ok(Json(DataResponse {
        data: SessionProgressView::new(&session, Some(progress)),
    }))
}

/// POST /api/v1/courses/{course_id}/sessions/{session_id}/complete
///
/// Mark a session complete. Idempotent.
pub async fn complete_session(
    State(state): State<AppState>,
    learner: Learner,
    Path((course_id, session_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state.pool, &course_id).await?;
    let session = course
        .find_session(&session_id)
        .ok_or_else(|| CoreError::not_found("Session", format!("{course_id}/{session_id}")))?;

    let progress = SessionProgressRepo::complete_session(
        &state.pool,
        &learner.code,
        &learner.customer_name,
        &course_id,
        &session_id,
    )
    .await?;
    tracing::info!(code = %learner.code, %course_id, %session_id, "Session completed");

    let keys: Vec<SessionKey> = UserProgressRepo::completed_sessions(&state.pool, &learner.code)
        .await?
        .iter()
        .map(|c| c.key())
        .collect();

    Ok(Json(DataResponse {
        data: SessionCompletion {
            progress: SessionProgressView::new(session, Some(progress)),
            completed_sessions: keys.iter().map(ToString::to_string).collect(),
            course_percent: course_percentage(&keys, &course_id, course.sessions.len()),
            completed_session_keys: keys,
        },
    }))
}

// ---------------------------------------------------------------------------
// Project progress
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{category_id}/{project_id}/progress
pub async fn get_project_progress(
    State(state): State<AppState>,
    learner: Learner,
    Path((category_id, project_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state.pool, &category_id, &project_id).await?;
    let progress =
        ProjectProgressRepo::find(&state.pool, &learner.code, &category_id, &project_id).await?;
    Ok(Json(DataResponse {
        data: ProjectProgressView::new(&project, progress),
    }))
}

/// POST /api/v1/projects/{category_id}/{project_id}/requirements/toggle
///
/// Tick or untick one requirement. The project is complete exactly when
/// every requirement is ticked.
pub async fn toggle_requirement(
    State(state): State<AppState>,
    learner: Learner,
    Path((category_id, project_id)): Path<(String, String)>,
    Json(input): Json<ToggleRequirement>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state.pool, &category_id, &project_id).await?;
    if !project.requirements.contains(&input.requirement) {
        return Err(CoreError::Validation(format!(
            "Requirement '{}' is not part of project '{project_id}'",
            input.requirement
        ))
        .into());
    }

    let progress = ProjectProgressRepo::toggle_requirement(
        &state.pool,
        &learner.code,
        &category_id,
        &project_id,
        &input.requirement,
        &project.requirements,
    )
    .await?;
    if progress.is_completed {
        tracing::info!(code = %learner.code, %category_id, %project_id, "Project completed");
    }

    Ok(Json(DataResponse {
        data: ProjectProgressView::new(&project, Some(progress)),
    }))
}
