//! Gateway configuration.

use std::str::FromStr;

use common::ConfigError;

/// Access policy applied to the book routes (both `/books` and `/api/books`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookAccess {
    /// No session required
    #[default]
    Public,
    /// Any logged-in user
    Authenticated,
    /// Logged-in admins only
    Admin,
}

impl FromStr for BookAccess {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(BookAccess::Public),
            "authenticated" => Ok(BookAccess::Authenticated),
            "admin" => Ok(BookAccess::Admin),
            other => Err(ConfigError::Invalid {
                key: "BOOK_ACCESS",
                reason: format!("expected public, authenticated or admin, got '{}'", other),
            }),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Who may call the book routes
    pub book_access: BookAccess,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let book_access = match std::env::var("BOOK_ACCESS") {
            Ok(value) => value.parse()?,
            Err(_) => BookAccess::default(),
        };

        Ok(Self { book_access })
    }
}
