//! Authenticated session payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::{User, UserRole};

/// Session established at login and carried by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session identifier
    pub id: Uuid,
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a new session for `user` that lasts `ttl`.
    ///
    /// Fails when the expiry is not representable.
    pub fn start(user: &User, ttl: Duration) -> DomainResult<Self> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::internal("Failed to establish session"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Exact role membership check.
    pub fn has_any_role(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self.role)
    }
}
