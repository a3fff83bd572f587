//! Progress arithmetic shared by every progress view.
//!
//! Three granularities are tracked: per-session task checklists, per-project
//! requirement checklists, and the aggregate list of completed sessions.
//! Completion policy differs on purpose:
//!
//! - a session is complete only when explicitly marked so; ticking every
//!   task does not complete it,
//! - a project is complete exactly when every requirement is ticked.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Percentages
// ---------------------------------------------------------------------------

/// Integer percentage of `completed` over `total`, rounded to nearest.
///
/// Returns `0` when `total` is zero. Ties round away from zero, so
/// `percentage(1, 8) == 13`. The result is clamped to `0..=100`.
pub fn percentage(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    let pct = (100.0 * completed as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as i32
}

// ---------------------------------------------------------------------------
// Checklist toggling
// ---------------------------------------------------------------------------

/// Outcome of flipping one item of a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    Added,
    Removed,
}

/// Flip membership of `item` in `items` (set XOR).
///
/// Removing drops every copy, so a list that somehow picked up duplicates
/// is repaired on the way out. Adding appends, preserving tick order.
pub fn toggle_member(items: &mut Vec<String>, item: &str) -> Toggle {
    if items.iter().any(|i| i == item) {
        items.retain(|i| i != item);
        Toggle::Removed
    } else {
        items.push(item.to_string());
        Toggle::Added
    }
}

/// Drop ticked entries that are no longer among the project's `requirements`.
///
/// Requirement lists are editable, so a learner's checklist can hold text
/// that was since reworded or removed. Such entries never count.
pub fn retain_current(completed: &mut Vec<String>, requirements: &[String]) {
    completed.retain(|r| requirements.contains(r));
}

/// Whether every one of `requirements` is ticked in `completed`.
pub fn requirements_complete(completed: &[String], requirements: &[String]) -> bool {
    requirements.iter().all(|r| completed.contains(r))
}

// ---------------------------------------------------------------------------
// Completed-session keys
// ---------------------------------------------------------------------------

/// A completed session, identified by its course and session ids.
///
/// Stored as a structured pair. [`fmt::Display`] renders the legacy
/// `"<course>-<session>"` identifier for exports and older clients; it is
/// never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey {
    pub course_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(course_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            session_id: session_id.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.course_id, self.session_id)
    }
}

/// Number of completed sessions belonging to `course_id`.
///
/// Matches on the course id exactly, so `html` never counts sessions of
/// `html-css`.
pub fn completed_in_course(completed: &[SessionKey], course_id: &str) -> usize {
    completed.iter().filter(|k| k.course_id == course_id).count()
}

/// Course-level completion percentage for one learner.
pub fn course_percentage(completed: &[SessionKey], course_id: &str, session_count: usize) -> i32 {
    percentage(completed_in_course(completed, course_id), session_count)
}
