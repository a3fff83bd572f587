//! JWT generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Two kinds
//! are issued: short-lived admin tokens after a password login, and
//! long-lived learner tokens whose subject is the redeemed access code.
//! A learner token alone never grants access; the bound code is
//! re-checked on every request.

use academy_core::roles::{ROLE_ADMIN, ROLE_LEARNER};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject used for admin tokens. There is a single administrator.
pub const ADMIN_SUBJECT: &str = "admin";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the access code for learners, [`ADMIN_SUBJECT`] for admins.
    pub sub: String,
    /// Role name (`"admin"` or `"learner"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Admin token lifetime in minutes (default: 60).
    pub admin_token_expiry_mins: i64,
    /// Learner token lifetime in days (default: 30).
    pub learner_token_expiry_days: i64,
}

/// Default admin token expiry in minutes.
const DEFAULT_ADMIN_EXPIRY_MINS: i64 = 60;
/// Default learner token expiry in days.
const DEFAULT_LEARNER_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ADMIN_EXPIRY_MINS`    | no       | `60`    |
    /// | `JWT_LEARNER_EXPIRY_DAYS`  | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let admin_token_expiry_mins: i64 = std::env::var("JWT_ADMIN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ADMIN_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ADMIN_EXPIRY_MINS must be a valid i64");

        let learner_token_expiry_days: i64 = std::env::var("JWT_LEARNER_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_LEARNER_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_LEARNER_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            admin_token_expiry_mins,
            learner_token_expiry_days,
        }
    }

    /// Admin token lifetime in seconds.
    pub fn admin_ttl_secs(&self) -> i64 {
        self.admin_token_expiry_mins * 60
    }

    /// Learner token lifetime in seconds.
    pub fn learner_ttl_secs(&self) -> i64 {
        self.learner_token_expiry_days * 24 * 60 * 60
    }
}

/// Generate an HS256 token for `subject` with the given role and lifetime.
pub fn generate_token(
    subject: &str,
    role: &str,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Token for the administrator.
pub fn generate_admin_token(config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(ADMIN_SUBJECT, ROLE_ADMIN, config.admin_ttl_secs(), config)
}

/// Token bound to a redeemed access code.
pub fn generate_learner_token(
    access_code: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(access_code, ROLE_LEARNER, config.learner_ttl_secs(), config)
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
