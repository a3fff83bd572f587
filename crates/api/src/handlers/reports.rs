//! Admin progress reports: the student progress table and its CSV export.

use std::collections::HashMap;

use academy_core::export::{progress_export_filename, render_progress_csv, ProgressExportRow};
use academy_core::progress::SessionKey;
use academy_core::types::Timestamp;
use academy_core::validation::{clamp_limit, clamp_offset};
use academy_db::models::user_progress::UserProgress;
use academy_db::repositories::{AccessCodeRepo, UserProgressRepo};
use academy_db::DbPool;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use super::dashboard::CatalogIndex;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for the progress table.
const DEFAULT_LIMIT: i64 = 100;
/// Maximum page size for the progress table.
const MAX_LIMIT: i64 = 500;

/// One learner's line in the admin progress table.
#[derive(Debug, Serialize)]
pub struct StudentProgress {
    pub user_code: String,
    /// From the access registry; `None` if the code no longer resolves.
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub is_active: Option<bool>,
    pub completed_sessions: Vec<String>,
    pub completed_count: usize,
    pub progress_percent: i32,
    pub current_course: Option<String>,
    pub current_session: Option<String>,
    pub login_count: i32,
    pub last_activity: Timestamp,
}

impl From<StudentProgress> for ProgressExportRow {
    fn from(s: StudentProgress) -> Self {
        ProgressExportRow {
            customer_name: s.customer_name,
            customer_phone: s.customer_phone,
            access_code: s.user_code,
            completed_sessions: s.completed_count,
            progress_percent: s.progress_percent,
            current_course: s.current_course,
            current_session: s.current_session,
            login_count: s.login_count,
            last_activity: s.last_activity,
        }
    }
}

/// Join progress rows with the access registry and the catalog.
async fn build_report(pool: &DbPool, rows: Vec<UserProgress>) -> AppResult<Vec<StudentProgress>> {
    let catalog = CatalogIndex::load(pool).await?;
    let codes: HashMap<String, _> = AccessCodeRepo::list(pool)
        .await?
        .into_iter()
        .map(|c| (c.code.clone(), c))
        .collect();

    let user_codes: Vec<String> = rows.iter().map(|r| r.user_code.clone()).collect();
    let mut completed: HashMap<String, Vec<SessionKey>> = HashMap::new();
    for c in UserProgressRepo::completed_sessions_for(pool, &user_codes).await? {
        completed.entry(c.user_code.clone()).or_default().push(c.key());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let keys = completed.remove(&row.user_code).unwrap_or_default();
            let access = codes.get(&row.user_code);
            let current_course = row
                .current_course
                .as_deref()
                .map(|id| catalog.course_title(id).unwrap_or(id).to_string());
            let current_session = row.current_session.as_deref().map(|id| {
                row.current_course
                    .as_deref()
                    .and_then(|course| catalog.session_title(course, id))
                    .unwrap_or(id)
                    .to_string()
            });
            StudentProgress {
                customer_name: access.map(|a| a.customer_name.clone()),
                customer_phone: access.map(|a| a.customer_phone.clone()),
                is_active: access.map(|a| a.is_active),
                completed_count: keys.len(),
                progress_percent: catalog.overall_percent(&keys),
                completed_sessions: keys.iter().map(ToString::to_string).collect(),
                current_course,
                current_session,
                login_count: row.login_count,
                last_activity: row.last_activity,
                user_code: row.user_code,
            }
        })
        .collect())
}

/// GET /api/v1/admin/progress?limit=&offset=
///
/// Student progress, most recently active first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let rows = UserProgressRepo::list(&state.pool, limit, offset).await?;
    let report = build_report(&state.pool, rows).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/admin/progress/export
///
/// Every learner's progress as a CSV download.
pub async fn export_csv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let rows = UserProgressRepo::list_all(&state.pool).await?;
    let report = build_report(&state.pool, rows).await?;
    let count = report.len();

    let export: Vec<ProgressExportRow> = report.into_iter().map(Into::into).collect();
    let csv = render_progress_csv(&export);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        progress_export_filename(Utc::now())
    );
    tracing::info!(rows = count, "Student progress exported");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
