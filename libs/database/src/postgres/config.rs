use core_config::{ConfigError, FromEnv, env_bool, env_or_default, env_required};
use sea_orm::ConnectOptions;
use std::time::Duration;

/// PostgreSQL connection pool configuration
///
/// Environment variables:
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default: 10)
/// - `DB_MIN_CONNECTIONS` (default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 8)
/// - `DB_IDLE_TIMEOUT_SECS` (default: 600)
/// - `DB_MAX_LIFETIME_SECS` (default: 1800)
/// - `DB_SQLX_LOGGING` (default: false)
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    /// Config with default pool settings for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            sqlx_logging: false,
        }
    }
}

fn parse_number<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;
        let min_connections = parse_number("DB_MIN_CONNECTIONS", "1")?;
        let max_connections = parse_number("DB_MAX_CONNECTIONS", "10")?;

        if min_connections > max_connections {
            return Err(ConfigError::ParseError {
                key: "DB_MIN_CONNECTIONS".to_string(),
                details: format!(
                    "must not exceed DB_MAX_CONNECTIONS ({} > {})",
                    min_connections, max_connections
                ),
            });
        }

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout_secs: parse_number("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: parse_number("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            idle_timeout_secs: parse_number("DB_IDLE_TIMEOUT_SECS", "600")?,
            max_lifetime_secs: parse_number("DB_MAX_LIFETIME_SECS", "1800")?,
            sqlx_logging: env_bool("DB_SQLX_LOGGING", false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL_VARS: [&str; 7] = [
        "DB_MAX_CONNECTIONS",
        "DB_MIN_CONNECTIONS",
        "DB_CONNECT_TIMEOUT_SECS",
        "DB_ACQUIRE_TIMEOUT_SECS",
        "DB_IDLE_TIMEOUT_SECS",
        "DB_MAX_LIFETIME_SECS",
        "DB_SQLX_LOGGING",
    ];

    fn with_only_url<F: FnOnce()>(extra: &[(&str, Option<&str>)], f: F) {
        let mut vars: Vec<(&str, Option<&str>)> = POOL_VARS.iter().map(|k| (*k, None)).collect();
        vars.push(("DATABASE_URL", Some("postgres://localhost/users")));
        vars.extend_from_slice(extra);
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_postgres_config_new_uses_defaults() {
        let config = PostgresConfig::new("postgres://localhost/users");
        assert_eq!(config.url, "postgres://localhost/users");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert!(!config.sqlx_logging);
    }

    #[test]
    fn test_postgres_config_from_env_minimal() {
        with_only_url(&[], || {
            let config = PostgresConfig::from_env().unwrap();
            assert_eq!(config.url, "postgres://localhost/users");
            assert_eq!(config.max_connections, 10);
            assert_eq!(config.idle_timeout_secs, 600);
        });
    }

    #[test]
    fn test_postgres_config_from_env_custom() {
        with_only_url(
            &[
                ("DB_MAX_CONNECTIONS", Some("50")),
                ("DB_MIN_CONNECTIONS", Some("10")),
                ("DB_SQLX_LOGGING", Some("true")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.min_connections, 10);
                assert!(config.sqlx_logging);
            },
        );
    }

    #[test]
    fn test_postgres_config_from_env_missing_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = PostgresConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_postgres_config_rejects_inverted_pool_bounds() {
        with_only_url(
            &[
                ("DB_MAX_CONNECTIONS", Some("2")),
                ("DB_MIN_CONNECTIONS", Some("5")),
            ],
            || {
                let err = PostgresConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MIN_CONNECTIONS"));
            },
        );
    }

    #[test]
    fn test_postgres_config_from_env_invalid_number() {
        with_only_url(&[("DB_MAX_CONNECTIONS", Some("many"))], || {
            let err = PostgresConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
        });
    }
}
