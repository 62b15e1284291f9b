//! Auth Service Library
//!
//! Credential store, registration and login, and the signed session tokens
//! the gateway stores in a cookie.

pub mod config;
pub mod repository;
pub mod service;
pub mod session;

pub use config::AuthServiceConfig;
pub use repository::{UserRepository, UserStore};
pub use service::{AuthService, Authenticator};
pub use session::{SessionClaims, SessionTokens};
