//! Error taxonomy for the authentication endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;

/// Everything the auth endpoints can reject a request with.
///
/// Client-visible messages mirror the HTTP taxonomy: 400 for malformed input,
/// 401 for any authentication failure, 500 for server-side faults. Internal
/// detail only goes to the logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid request payload.")]
    InvalidPayload,

    #[error("Invalid Stellar public key.")]
    InvalidPublicKey,

    #[error("Challenge missing or expired. Request a new one.")]
    ChallengeMissing,

    #[error("Challenge does not match.")]
    ChallengeMismatch,

    #[error("Network passphrase mismatch in challenge.")]
    NetworkMismatch,

    #[error("Invalid wallet signature.")]
    InvalidSignature,

    #[error("Authentication required.")]
    SessionMissing,

    #[error("Failed to sync wallet profile. Try again.")]
    ProfileSync(#[source] anyhow::Error),

    #[error("Failed to verify authentication signature.")]
    SessionToken(#[source] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidPayload | AuthError::InvalidPublicKey => StatusCode::BAD_REQUEST,
            AuthError::ChallengeMissing
            | AuthError::ChallengeMismatch
            | AuthError::NetworkMismatch
            | AuthError::InvalidSignature
            | AuthError::SessionMissing => StatusCode::UNAUTHORIZED,
            AuthError::ProfileSync(_) | AuthError::SessionToken(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            match &self {
                AuthError::ProfileSync(source) | AuthError::SessionToken(source) => {
                    tracing::error!(error = ?source, "auth request failed");
                }
                _ => tracing::error!(error = %self, "auth request failed"),
            }
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
