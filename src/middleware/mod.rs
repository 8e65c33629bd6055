//! Middleware for LemiPay API
//!
//! Session-cookie authentication guard for routes that require a logged-in
//! wallet.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::app_state::AppState;
use crate::auth::constants::AUTH_COOKIE_NAME;
use crate::auth::AuthError;

/// Verified session identity, inserted into request extensions by
/// [`require_session`].
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub public_key: String,
}

/// Rejects requests that do not carry a valid session cookie; otherwise
/// exposes the authenticated public key to inner handlers.
pub async fn require_session(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar
        .get(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
    else {
        return AuthError::SessionMissing.into_response();
    };

    let Some(claims) = app_state.auth_service.verify_session_token(&token) else {
        return AuthError::SessionMissing.into_response();
    };

    request.extensions_mut().insert(AuthSession {
        public_key: claims.public_key,
    });

    next.run(request).await
}
