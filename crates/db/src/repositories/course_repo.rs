//! Repository for the `courses` and `sessions` tables.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::models::course::{
    Course, CourseWithSessions, CreateCourse, CreateSession, Session, UpdateCourse, UpdateSession,
};

/// Column list for `courses`.
const COURSE_COLUMNS: &str = "id, title, description, icon, created_at, updated_at";

/// Column list for `sessions`.
const SESSION_COLUMNS: &str = "id, course_id, title, description, content, assignment, tasks, \
    video_url, order_index, created_at, updated_at";

/// Provides catalog operations for courses and their sessions.
pub struct CourseRepo;

impl CourseRepo {
    /// All courses with their sessions in display order.
    ///
    /// Two queries, grouped in memory; the catalog is small.
    pub async fn list_with_sessions(pool: &PgPool) -> Result<Vec<CourseWithSessions>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at, id");
        let courses = sqlx::query_as::<_, Course>(&query).fetch_all(pool).await?;

        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY course_id, order_index, id"
        );
        let sessions = sqlx::query_as::<_, Session>(&query).fetch_all(pool).await?;

        let mut by_course: HashMap<String, Vec<Session>> = HashMap::new();
        for session in sessions {
            by_course
                .entry(session.course_id.clone())
                .or_default()
                .push(session);
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let sessions = by_course.remove(&course.id).unwrap_or_default();
                CourseWithSessions { course, sessions }
            })
            .collect())
    }

    /// Find a course by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course with its ordered sessions.
    pub async fn find_with_sessions(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<CourseWithSessions>, sqlx::Error> {
        let Some(course) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let sessions = Self::list_sessions(pool, id).await?;
        Ok(Some(CourseWithSessions { course, sessions }))
    }

    /// Sessions of one course, ordered by `(order_index, id)`.
    pub async fn list_sessions(pool: &PgPool, course_id: &str) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions \
             WHERE course_id = $1 \
             ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find one session of one course.
    pub async fn find_session(
        pool: &PgPool,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE course_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(course_id)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a course with no sessions.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (id, title, description, icon) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '')) \
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Patch a course. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                icon = COALESCE($4, icon) \
             WHERE id = $1 \
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Add a session to a course.
    ///
    /// Without an explicit `order_index` the session goes after the current
    /// last one. A missing course surfaces as a `fk_sessions_course`
    /// violation.
    pub async fn create_session(
        pool: &PgPool,
        course_id: &str,
        input: &CreateSession,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions \
                (id, course_id, title, description, content, assignment, tasks, video_url, order_index) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, ''), \
                COALESCE($7, '{{}}'::TEXT[]), NULLIF($8, ''), \
                COALESCE($9, (SELECT COALESCE(MAX(order_index) + 1, 0) FROM sessions WHERE course_id = $2))) \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.id)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.assignment)
            .bind(&input.tasks)
            .bind(&input.video_url)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// Patch a session. Only non-`None` fields are applied; an empty
    /// `video_url` clears the stored link.
    pub async fn update_session(
        pool: &PgPool,
        course_id: &str,
        session_id: &str,
        input: &UpdateSession,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                content = COALESCE($5, content), \
                assignment = COALESCE($6, assignment), \
                tasks = COALESCE($7, tasks), \
                video_url = CASE WHEN $8::TEXT IS NULL THEN video_url ELSE NULLIF($8, '') END, \
                order_index = COALESCE($9, order_index) \
             WHERE course_id = $1 AND id = $2 \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(course_id)
            .bind(session_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.assignment)
            .bind(&input.tasks)
            .bind(&input.video_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }
}
