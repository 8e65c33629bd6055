//! Route definitions for LemiPay API

use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;
use crate::handlers::{
    get_session, health_check, issue_challenge, logout, root, verify_signature,
};
use crate::middleware::require_session;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes(state.clone()))
        .with_state(state)
}

// Auth routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/session", get(get_session))
        .route_layer(axum::middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/api/auth/challenge", post(issue_challenge))
        .route("/api/auth/verify", post(verify_signature))
        .route("/api/auth/logout", post(logout))
        .merge(protected)
}
