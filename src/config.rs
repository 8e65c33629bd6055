//! Server configuration loaded from the environment

use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Drives the secret policy and the cookie `Secure` flag.
    pub production: bool,
    /// Absent means profile sync is disabled; verification still works.
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(3001);

        let production = env::var("APP_ENV")
            .map(|app_env| app_env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        Self {
            port,
            production,
            database_url,
        }
    }
}
