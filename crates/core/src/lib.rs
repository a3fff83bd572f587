//! Domain logic for the academy platform.
//!
//! This crate has no database or HTTP dependencies: repositories and
//! handlers load data and hand it to the pure functions here.

pub mod access_code;
pub mod content;
pub mod error;
pub mod export;
pub mod gating;
pub mod progress;
pub mod roles;
pub mod types;
pub mod validation;
pub mod video;
