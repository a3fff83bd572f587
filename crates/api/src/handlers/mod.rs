pub mod access;
pub mod access_codes;
pub mod admin_auth;
pub mod catalog;
pub mod content;
pub mod dashboard;
pub mod progress;
pub mod reports;
