//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    /// Whether the session cookie carries the `Secure` flag.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, secure_cookies: bool) -> Self {
        Self {
            auth_service,
            secure_cookies,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}
