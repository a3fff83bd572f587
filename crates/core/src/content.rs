//! Catalog rules: project difficulty, content identifiers, and
//! previous/next navigation through a course's ordered sessions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DIFFICULTY_BEGINNER: &str = "Beginner";
pub const DIFFICULTY_INTERMEDIATE: &str = "Intermediate";
pub const DIFFICULTY_ADVANCED: &str = "Advanced";

/// All valid difficulty labels, in ascending order.
pub const VALID_DIFFICULTIES: &[&str] = &[
    DIFFICULTY_BEGINNER,
    DIFFICULTY_INTERMEDIATE,
    DIFFICULTY_ADVANCED,
];

/// Maximum length of a content identifier.
pub const MAX_CONTENT_ID_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How demanding a hands-on project is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Convert from the stored string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            DIFFICULTY_BEGINNER => Ok(Self::Beginner),
            DIFFICULTY_INTERMEDIATE => Ok(Self::Intermediate),
            DIFFICULTY_ADVANCED => Ok(Self::Advanced),
            _ => Err(format!(
                "Invalid difficulty '{s}'. Must be one of: {}",
                VALID_DIFFICULTIES.join(", ")
            )),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => DIFFICULTY_BEGINNER,
            Self::Intermediate => DIFFICULTY_INTERMEDIATE,
            Self::Advanced => DIFFICULTY_ADVANCED,
        }
    }
}

/// Validate an optional difficulty string coming from an admin form.
pub fn validate_difficulty(value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(s) => Difficulty::from_str_value(s)
            .map(|_| ())
            .map_err(CoreError::Validation),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Validate a course, session, category, or project identifier.
///
/// Identifiers appear in URLs, so they are restricted to lowercase ASCII
/// letters, digits, and hyphens, and may not start or end with a hyphen.
pub fn validate_content_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() || id.len() > MAX_CONTENT_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Identifier must be 1-{MAX_CONTENT_ID_LENGTH} characters"
        )));
    }
    let valid_chars = id
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !valid_chars || id.starts_with('-') || id.ends_with('-') {
        return Err(CoreError::Validation(format!(
            "Invalid identifier '{id}': use lowercase letters, digits, and inner hyphens"
        )));
    }
    Ok(())
}

/// Identifier for a project created without an explicit id.
pub fn generated_project_id(now: Timestamp) -> String {
    format!("project-{}", now.timestamp_millis())
}

/// Reject a blank required text field.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Position of one session within its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionNavigation {
    /// Zero-based index of the session within the course.
    pub index: usize,
    pub previous_session_id: Option<String>,
    pub next_session_id: Option<String>,
    /// Sessions after this one.
    pub remaining_sessions: usize,
}

/// Locate `session_id` within `ordered_ids` (already sorted by order index).
///
/// Returns `None` if the session is not part of the list.
pub fn navigation_for<S: AsRef<str>>(ordered_ids: &[S], session_id: &str) -> Option<SessionNavigation> {
    let index = ordered_ids.iter().position(|id| id.as_ref() == session_id)?;
    let previous_session_id = index
        .checked_sub(1)
        .map(|i| ordered_ids[i].as_ref().to_string());
    let next_session_id = ordered_ids.get(index + 1).map(|id| id.as_ref().to_string());

    Some(SessionNavigation {
        index,
        previous_session_id,
        next_session_id,
        remaining_sessions: ordered_ids.len() - index - 1,
    })
}
