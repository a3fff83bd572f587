//! Role names embedded in issued tokens.

/// Back-office administrator. Manages codes, content, and exports.
pub const ROLE_ADMIN: &str = "admin";

/// A visitor who has redeemed an access code.
pub const ROLE_LEARNER: &str = "learner";
