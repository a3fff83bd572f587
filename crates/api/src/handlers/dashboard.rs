//! Learner dashboard: overall, per-course and per-category progress.

use std::collections::HashSet;

use academy_core::progress::{completed_in_course, percentage, SessionKey};
use academy_core::types::Timestamp;
use academy_db::models::course::CourseWithSessions;
use academy_db::repositories::{
    CourseRepo, ProjectProgressRepo, ProjectRepo, UserProgressRepo,
};
use academy_db::DbPool;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::learner::Learner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Catalog index
// ---------------------------------------------------------------------------

/// The course catalog loaded once per request, for counting and title
/// lookups against completed-session keys.
pub(crate) struct CatalogIndex {
    pub courses: Vec<CourseWithSessions>,
}

impl CatalogIndex {
    pub async fn load(pool: &DbPool) -> AppResult<Self> {
        Ok(Self {
            courses: CourseRepo::list_with_sessions(pool).await?,
        })
    }

    pub fn total_sessions(&self) -> usize {
        self.courses.iter().map(|c| c.sessions.len()).sum()
    }

    /// Completed keys that still name a session in the catalog.
    pub fn existing<'a>(&self, keys: &'a [SessionKey]) -> Vec<&'a SessionKey> {
        keys.iter()
            .filter(|k| self.session_title(&k.course_id, &k.session_id).is_some())
            .collect()
    }

    /// Overall completion: existing completed sessions over all sessions.
    pub fn overall_percent(&self, keys: &[SessionKey]) -> i32 {
        percentage(self.existing(keys).len(), self.total_sessions())
    }

    pub fn course_title(&self, course_id: &str) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.course.id == course_id)
            .map(|c| c.course.title.as_str())
    }

    pub fn session_title(&self, course_id: &str, session_id: &str) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.course.id == course_id)
            .and_then(|c| c.find_session(session_id))
            .map(|s| s.title.as_str())
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub course_id: String,
    pub title: String,
    pub icon: String,
    pub completed_sessions: usize,
    pub total_sessions: usize,
    pub percent: i32,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub title: String,
    pub icon: String,
    pub completed_projects: usize,
    pub total_projects: usize,
    pub percent: i32,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub access_code: String,
    pub customer_name: String,
    pub login_count: i32,
    pub last_activity: Option<Timestamp>,
    /// Title of the course the learner last opened.
    pub current_course: Option<String>,
    /// Title of the session the learner last opened.
    pub current_session: Option<String>,
    pub overall_percent: i32,
    pub total_sessions: usize,
    /// Legacy `"<course>-<session>"` identifiers.
    pub completed_sessions: Vec<String>,
    pub completed_session_keys: Vec<SessionKey>,
    pub completed_session_titles: Vec<String>,
    pub courses: Vec<CourseSummary>,
    pub project_categories: Vec<CategorySummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/me/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    learner: Learner,
) -> AppResult<impl IntoResponse> {
    let catalog = CatalogIndex::load(&state.pool).await?;
    let categories = ProjectRepo::list_with_projects(&state.pool).await?;
    let progress = UserProgressRepo::find_by_user_code(&state.pool, &learner.code).await?;
    let keys: Vec<SessionKey> = UserProgressRepo::completed_sessions(&state.pool, &learner.code)
        .await?
        .iter()
        .map(|c| c.key())
        .collect();
    let project_progress = ProjectProgressRepo::list_for_user(&state.pool, &learner.code).await?;

    let courses = catalog
        .courses
        .iter()
        .map(|c| {
            let completed = completed_in_course(&keys, &c.course.id);
            CourseSummary {
                course_id: c.course.id.clone(),
                title: c.course.title.clone(),
                icon: c.course.icon.clone(),
                completed_sessions: completed,
                total_sessions: c.sessions.len(),
                percent: percentage(completed, c.sessions.len()),
            }
        })
        .collect();

    let done: HashSet<(&str, &str)> = project_progress
        .iter()
        .filter(|p| p.is_completed)
        .map(|p| (p.category_id.as_str(), p.project_id.as_str()))
        .collect();
    let project_categories = categories
        .iter()
        .map(|c| {
            let completed = c
                .projects
                .iter()
                .filter(|p| done.contains(&(c.category.id.as_str(), p.id.as_str())))
                .count();
            CategorySummary {
                category_id: c.category.id.clone(),
                title: c.category.title.clone(),
                icon: c.category.icon.clone(),
                completed_projects: completed,
                total_projects: c.projects.len(),
                percent: percentage(completed, c.projects.len()),
            }
        })
        .collect();

    let completed_session_titles = catalog
        .existing(&keys)
        .into_iter()
        .filter_map(|k| catalog.session_title(&k.course_id, &k.session_id))
        .map(str::to_string)
        .collect();

    let (current_course, current_session) = progress
        .as_ref()
        .map(|p| {
            let course = p.current_course.as_deref();
            let session = course.zip(p.current_session.as_deref());
            (
                course.and_then(|id| catalog.course_title(id)).map(str::to_string),
                session
                    .and_then(|(c, s)| catalog.session_title(c, s))
                    .map(str::to_string),
            )
        })
        .unwrap_or_default();

    Ok(Json(DataResponse {
        data: Dashboard {
            access_code: learner.code,
            customer_name: learner.customer_name,
            login_count: progress.as_ref().map_or(0, |p| p.login_count),
            last_activity: progress.as_ref().map(|p| p.last_activity),
            current_course,
            current_session,
            overall_percent: catalog.overall_percent(&keys),
            total_sessions: catalog.total_sessions(),
            completed_sessions: keys.iter().map(ToString::to_string).collect(),
            completed_session_titles,
            completed_session_keys: keys,
            courses,
            project_categories,
        },
    }))
}
