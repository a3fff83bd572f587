//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod access_code;
pub mod course;
pub mod project;
pub mod project_progress;
pub mod session_progress;
pub mod user_progress;
