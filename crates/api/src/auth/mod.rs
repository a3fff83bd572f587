//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and verification of the admin password.
//! - [`jwt`] -- JWT generation and validation for admin and learner tokens.

pub mod jwt;
pub mod password;
