//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use book_service_lib::BookService;
use database::Database;

use crate::config::GatewayConfig;
use crate::session::SessionCookies;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub book_service: Arc<dyn BookService>,
    pub sessions: SessionCookies,
    /// Present when running against a real database (used by health checks)
    pub database: Option<Database>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        book_service: Arc<dyn BookService>,
        sessions: SessionCookies,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth_service,
            book_service,
            sessions,
            database: None,
            config,
        }
    }

    /// Attach the database handle used for health checks.
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }
}
