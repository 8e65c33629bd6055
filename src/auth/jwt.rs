//! Session token codec.
//!
//! Sessions are stateless: a compact HS256 JWT carrying the authenticated
//! public key and an expiry. Validity is fully determined by the signature
//! and expiry check; the server keeps no session table.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::constants::AUTH_COOKIE_MAX_AGE_SECONDS;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;
const MIN_SECRET_LENGTH: usize = 32;

/// Dev-only fallback so login works without a configured secret outside
/// production.
const DEV_JWT_SECRET: &str = "lemipay-dev-secret-do-not-use-in-production!!";

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub iat: i64,
    pub exp: i64,
}

/// Symmetric signing key for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
}

impl SessionKeys {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Reads `JWT_SECRET` from the environment.
    ///
    /// A missing or too-short secret is a fatal configuration error in
    /// production; outside production it falls back to a dev secret with a
    /// loud warning.
    pub fn from_env(production: bool) -> Result<Self> {
        let secret = std::env::var("JWT_SECRET").ok();

        match secret {
            Some(secret) if secret.len() >= MIN_SECRET_LENGTH => Ok(Self::new(secret)),
            _ if production => {
                bail!("JWT_SECRET must be set and at least {MIN_SECRET_LENGTH} characters long")
            }
            _ => {
                warn!(
                    "JWT_SECRET not set or too short. Using dev secret. \
                     Set JWT_SECRET for production."
                );
                Ok(Self::new(DEV_JWT_SECRET))
            }
        }
    }

    /// Signs a session token for `public_key` with the fixed session max-age.
    pub fn sign_session_token(&self, public_key: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            public_key: public_key.to_string(),
            iat: now,
            exp: now + AUTH_COOKIE_MAX_AGE_SECONDS,
        };

        jsonwebtoken::encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .context("Failed to sign session token")
    }

    /// Validates a session token; any failure (expired, tampered, malformed,
    /// wrong algorithm, missing public key) is reported as `None`.
    pub fn verify_session_token(&self, token: &str) -> Option<SessionClaims> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .ok()?;

        if data.claims.public_key.is_empty() {
            return None;
        }

        Some(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC_KEY: &str = "GABCDEFGHIJKLMNOPQRSTUVWXYZ234567ABCDEFGHIJKLMNOPQRSTUVW";

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret-test-secret-test-secret!")
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let keys = keys();
        let token = keys.sign_session_token(PUBLIC_KEY).unwrap();

        let claims = keys.verify_session_token(&token).unwrap();
        assert_eq!(claims.public_key, PUBLIC_KEY);
        assert_eq!(claims.exp - claims.iat, AUTH_COOKIE_MAX_AGE_SECONDS);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let token = keys.sign_session_token(PUBLIC_KEY).unwrap();

        // Flip one character of the signature segment.
        let flipped = if token.ends_with('x') { 'y' } else { 'x' };
        let mut tampered = token[..token.len() - 1].to_string();
        tampered.push(flipped);

        assert!(keys.verify_session_token(&tampered).is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = SessionKeys::new("another-secret-another-secret-another!!!")
            .sign_session_token(PUBLIC_KEY)
            .unwrap();

        assert!(keys().verify_session_token(&token).is_none());
    }

    #[test]
    fn empty_public_key_claim_is_rejected() {
        let keys = keys();
        let token = keys.sign_session_token("").unwrap();

        assert!(keys.verify_session_token(&token).is_none());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let keys = keys();
        assert!(keys.verify_session_token("").is_none());
        assert!(keys.verify_session_token("not.a.jwt").is_none());
    }
}
