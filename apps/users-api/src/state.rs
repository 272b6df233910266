//! Shared application state handed to the route builders.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Cloned per router (cheap: the pool and the signing keys are shared).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Token issuer/verifier built from `config.jwt`
    pub jwt: JwtAuth,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: DatabaseConnection) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        Self { config, db, jwt }
    }
}
