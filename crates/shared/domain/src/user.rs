//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration.
///
/// Roles are compared exactly; there is no hierarchy between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Role granted for a role requested at registration.
    ///
    /// Only the exact string `"admin"` yields [`UserRole::Admin`].
    pub fn from_requested(requested: Option<&str>) -> Self {
        requested.map(UserRole::from).unwrap_or(UserRole::User)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// Login name
    pub username: String,
    /// User role
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_role_exact_admin_only() {
        assert_eq!(UserRole::from_requested(Some("admin")), UserRole::Admin);
        assert_eq!(UserRole::from_requested(Some("Admin")), UserRole::User);
        assert_eq!(UserRole::from_requested(Some("ADMIN")), UserRole::User);
        assert_eq!(UserRole::from_requested(Some("superuser")), UserRole::User);
        assert_eq!(UserRole::from_requested(Some("")), UserRole::User);
        assert_eq!(UserRole::from_requested(None), UserRole::User);
    }

    #[test]
    fn test_role_round_trips_through_string() {
        for role in [UserRole::User, UserRole::Admin] {
            let stored = role.to_string();
            assert_eq!(UserRole::from(stored.as_str()), role);
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "secret-hash".to_string(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
