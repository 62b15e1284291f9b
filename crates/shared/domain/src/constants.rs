//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Books
// =============================================================================

/// Earliest accepted publication year
pub const MIN_PUBLICATION_YEAR: i32 = 1;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_PUBLICATION_YEAR: &str = "publication_year";

// =============================================================================
// Sessions
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime in hours (one year)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Minimum session signing secret length (security requirement)
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Default name of the session cookie
pub const DEFAULT_SESSION_COOKIE: &str = "session";
