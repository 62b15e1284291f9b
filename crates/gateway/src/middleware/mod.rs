//! Access control middleware.

mod auth;

pub use auth::{login_redirect, require_auth, require_role, CurrentSession, RoleGate};
