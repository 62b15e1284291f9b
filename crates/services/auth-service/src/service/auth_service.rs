//! Authentication service - registration, login and the user directory.

use async_trait::async_trait;
use chrono::Duration;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{FieldErrors, Password, Session, User, UserRole};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Real Argon2 hash verified when the username is unknown, so both login
/// failures cost the same.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("timing-equalizer-password")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(
        &self,
        username: String,
        password: String,
        requested_role: Option<String>,
    ) -> AppResult<User>;

    /// Verify credentials and start a session
    async fn login(&self, username: String, password: String) -> AppResult<Session>;

    /// List registered users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of AuthService over a user repository.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    session_ttl_hours: i64,
    allow_admin_registration: bool,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        repo: Arc<dyn UserRepository>,
        session_ttl_hours: i64,
        allow_admin_registration: bool,
    ) -> Self {
        Self {
            repo,
            session_ttl_hours,
            allow_admin_registration,
        }
    }

    fn granted_role(&self, requested: Option<&str>) -> UserRole {
        let role = UserRole::from_requested(requested);
        if role.is_admin() && !self.allow_admin_registration {
            warn!("Admin role requested at registration but admin registration is disabled");
            return UserRole::User;
        }
        role
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        username: String,
        password: String,
        requested_role: Option<String>,
    ) -> AppResult<User> {
        let mut errors = FieldErrors::new();
        if username.trim().is_empty() {
            errors.insert("username".to_string(), "Username is required".to_string());
        }
        if password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }

        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let role = self.granted_role(requested_role.as_deref());
        let password_hash = Password::new(&password)?.into_string();

        let user = self.repo.create(username, password_hash, role).await?;
        info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");

        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<Session> {
        let user = self.repo.find_by_username(&username).await?;

        // Verify even when the user is unknown to keep timing uniform.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::from_hash(DUMMY_HASH.as_str()),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                let ttl = Duration::try_hours(self.session_ttl_hours)
                    .ok_or_else(|| AppError::internal("Failed to establish session"))?;
                let session = Session::start(&user, ttl)?;
                info!(user_id = user.id, username = %user.username, "User logged in");
                Ok(session)
            }
            _ => {
                warn!(username = %username, "Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }
}
