//! API handlers for the LemiPay auth endpoints

use axum::extract::State;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::constants::{AUTH_COOKIE_MAX_AGE_SECONDS, AUTH_COOKIE_NAME};
use crate::auth::AuthError;
use crate::middleware::AuthSession;
use crate::models::{
    ChallengeRequest, ChallengeResponse, LogoutResponse, SessionResponse, VerifyRequest,
    VerifyResponse,
};

pub async fn root() -> &'static str {
    "LemiPay API Server"
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// `POST /api/auth/challenge` - issue a signing challenge for a public key.
pub async fn issue_challenge(
    State(app_state): State<AppState>,
    Json(request): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, AuthError> {
    request.validate().map_err(|_| AuthError::InvalidPayload)?;

    let record = app_state
        .auth_service
        .issue_challenge(request.public_key.trim())
        .await?;

    Ok(Json(ChallengeResponse {
        challenge: record.challenge,
        expires_at: record.expires_at.timestamp_millis(),
        network_passphrase: record.network_passphrase,
    }))
}

/// `POST /api/auth/verify` - verify a signed challenge and set the session
/// cookie.
pub async fn verify_signature(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<VerifyRequest>,
) -> Result<(CookieJar, Json<VerifyResponse>), AuthError> {
    request.validate().map_err(|_| AuthError::InvalidPayload)?;

    let session = app_state
        .auth_service
        .verify(
            request.public_key.trim(),
            request.challenge.trim(),
            request.signed_message.trim(),
            request.display_name.as_deref(),
        )
        .await?;

    let jar = jar.add(session_cookie(session.token, app_state.secure_cookies));

    Ok((
        jar,
        Json(VerifyResponse {
            success: true,
            public_key: session.public_key,
        }),
    ))
}

/// `GET /api/auth/session` - identity behind the current session cookie.
/// Guarded by [`crate::middleware::require_session`].
pub async fn get_session(Extension(session): Extension<AuthSession>) -> Json<SessionResponse> {
    Json(SessionResponse {
        public_key: session.public_key,
    })
}

/// `POST /api/auth/logout` - clear the session cookie. Tokens stay valid
/// until expiry (stateless sessions); logout is purely client-side.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/"));
    (jar, Json(LogoutResponse { success: true }))
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(AUTH_COOKIE_MAX_AGE_SECONDS))
        .build()
}
