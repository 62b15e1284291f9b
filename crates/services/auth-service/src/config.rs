//! Auth service configuration.

use common::{parse_var, ConfigError, SessionConfig};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Session signing and cookie settings
    pub session: SessionConfig,
    /// Whether `POST /register` may grant the admin role on request
    pub allow_admin_registration: bool,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let allow_admin_registration = parse_var("ALLOW_ADMIN_REGISTRATION").unwrap_or(true);
        if allow_admin_registration {
            tracing::warn!("Self-service admin registration is enabled");
        }

        Ok(Self {
            session: SessionConfig::from_env()?,
            allow_admin_registration,
        })
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            allow_admin_registration: true,
        }
    }
}
