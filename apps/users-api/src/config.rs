use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_bool, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_users::StaticCredentials;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, read once at startup.
///
/// Composes the shared config pieces; a missing `DATABASE_URL`,
/// `JWT_SECRET`, `JWT_ISSUER` or `JWT_AUDIENCE` aborts startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub credentials: StaticCredentials,
    pub environment: Environment,
    /// Gate `/api/users` behind a bearer token (`AUTH_REQUIRED`, default true)
    pub auth_required: bool,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?;
        let credentials = StaticCredentials::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            jwt,
            credentials,
            environment,
            auth_required: env_bool("AUTH_REQUIRED", true)?,
            run_migrations: env_bool("RUN_MIGRATIONS", true)?,
        })
    }
}
