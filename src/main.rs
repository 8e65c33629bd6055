//! LemiPay Backend Server
//!
//! This is the main Rust backend server for LemiPay shared treasuries,
//! providing wallet-based authentication (Stellar challenge-response with
//! JWT sessions) and optional Postgres-backed wallet profiles.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use lemipay_server::app_state::AppState;
use lemipay_server::auth::constants::STELLAR_TESTNET_NETWORK_PASSPHRASE;
use lemipay_server::auth::{AuthService, InMemoryChallengeStore, SessionKeys};
use lemipay_server::config::AppConfig;
use lemipay_server::profile_service::ProfileService;
use lemipay_server::routes;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Fail fast on a misconfigured signing key; in production there is no
    // fallback.
    let session_keys =
        SessionKeys::from_env(config.production).expect("session signing key misconfigured");

    let profile_service = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect_lazy(url)
                .expect("DATABASE_URL is not a valid Postgres URL");
            Some(Arc::new(ProfileService::new(pool)))
        }
        None => {
            info!("DATABASE_URL not set; wallet profile sync disabled");
            None
        }
    };

    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryChallengeStore::new()),
        session_keys,
        profile_service,
        STELLAR_TESTNET_NETWORK_PASSPHRASE.to_string(),
    ));

    let state = AppState::new(auth_service, config.production);

    // Create the app router
    let app = routes::app(state)
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn build_cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        // Cookie-based sessions require credentialed CORS requests.
        .allow_credentials(true)
}
