//! Signed session tokens.
//!
//! A [`Session`] is carried by the client as an HS256 JWT. Decoding verifies
//! the signature, the expiry and every claim's type, so a token that decodes
//! is a complete, typed session.

use chrono::DateTime;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Session, UserRole};

/// JWT claims payload for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session id
    pub sid: Uuid,
    /// User id
    pub sub: i32,
    pub username: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Encodes and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionTokens {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a session into a token.
    pub fn encode(&self, session: &Session) -> AppResult<String> {
        let claims = SessionClaims {
            sid: session.id,
            sub: session.user_id,
            username: session.username.clone(),
            role: session.role,
            iat: chrono::Utc::now().timestamp(),
            exp: session.expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to sign session for {}: {}", session.username, e);
            AppError::internal("Failed to establish session")
        })
    }

    /// Verify a token and rebuild the session it carries.
    pub fn decode(&self, token: &str) -> AppResult<Session> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &self.validation)?.claims;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AppError::Unauthorized)?;

        Ok(Session {
            id: claims.sid,
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            expires_at,
        })
    }
}
