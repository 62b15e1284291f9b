//! Session cookie handling.
//!
//! The cookie holds a signed session token. Anything that fails to verify is
//! treated as "no session".

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use auth_service_lib::SessionTokens;
use common::{AppResult, SessionConfig};
use domain::Session;

/// Reads, writes and clears the session cookie.
#[derive(Clone)]
pub struct SessionCookies {
    tokens: SessionTokens,
    cookie_name: String,
    secure: bool,
}

impl SessionCookies {
    pub fn new(tokens: SessionTokens, config: &SessionConfig) -> Self {
        Self {
            tokens,
            cookie_name: config.cookie_name.clone(),
            secure: config.cookie_secure,
        }
    }

    /// Session carried by the request, if it verifies.
    pub fn load(&self, jar: &CookieJar) -> Option<Session> {
        let cookie = jar.get(&self.cookie_name)?;
        match self.tokens.decode(cookie.value()) {
            Ok(session) if !session.is_expired() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Ignoring invalid session cookie: {}", e);
                None
            }
        }
    }

    /// Add the signed session cookie to the response jar.
    pub fn store(&self, jar: CookieJar, session: &Session) -> AppResult<CookieJar> {
        let token = self.tokens.encode(session)?;
        let cookie = Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);

        Ok(jar.add(cookie))
    }

    /// Expire the session cookie. A jar without one is returned unchanged.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }
}
