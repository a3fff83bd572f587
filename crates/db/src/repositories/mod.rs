//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod access_code_repo;
pub mod course_repo;
pub mod project_progress_repo;
pub mod project_repo;
pub mod session_progress_repo;
pub mod user_progress_repo;

pub use access_code_repo::AccessCodeRepo;
pub use course_repo::CourseRepo;
pub use project_progress_repo::ProjectProgressRepo;
pub use project_repo::ProjectRepo;
pub use session_progress_repo::SessionProgressRepo;
pub use user_progress_repo::UserProgressRepo;
