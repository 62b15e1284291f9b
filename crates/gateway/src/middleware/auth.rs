//! Session authentication and role authorization gates.
//!
//! `require_auth` must run before `require_role`. Both stop the request by
//! returning a response without calling `next`, so nothing downstream runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use common::AppError;
use domain::{Session, UserRole};

use crate::handlers::response::found;
use crate::state::AppState;

pub const LOGIN_REQUIRED: &str = "You need to login first.";
pub const SESSION_INVALID: &str = "Session expired or invalid.";

/// Verified session of the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Roles allowed through [`require_role`].
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[UserRole]>,
}

impl RoleGate {
    pub fn new(allowed: impl Into<Arc<[UserRole]>>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn admin_only() -> Self {
        Self::new([UserRole::Admin])
    }

    pub fn allows(&self, session: &Session) -> bool {
        session.has_any_role(&self.allowed)
    }
}

/// `302 Found` to the login page with an error message in the query.
pub fn login_redirect(message: &str) -> Response {
    found(format!("/login?error={}", urlencoding::encode(message)))
}

/// Reject requests without a valid session cookie.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session) = state.sessions.load(&jar) else {
        tracing::debug!(path = %request.uri().path(), "Unauthenticated request redirected to login");
        return login_redirect(LOGIN_REQUIRED);
    };

    request.extensions_mut().insert(CurrentSession(session));
    next.run(request).await
}

/// Reject sessions whose role is not in the gate's allowed set.
pub async fn require_role(State(gate): State<RoleGate>, request: Request, next: Next) -> Response {
    let Some(CurrentSession(session)) = request.extensions().get::<CurrentSession>() else {
        return login_redirect(SESSION_INVALID);
    };

    if !gate.allows(session) {
        tracing::warn!(
            user_id = session.user_id,
            role = %session.role,
            path = %request.uri().path(),
            "Forbidden: role not permitted"
        );
        return AppError::Forbidden.into_response();
    }

    next.run(request).await
}
