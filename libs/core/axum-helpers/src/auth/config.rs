//! Token signing configuration.
//!
//! Implements `FromEnv` from `core_config`, like `PostgresConfig` and `ServerConfig`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Minimum length of the HS256 signing secret
pub const MIN_SECRET_LEN: usize = 32;

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT signing and validation settings.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ISSUER` (required)
/// - `JWT_AUDIENCE` (required)
/// - `JWT_TTL_SECS` (optional, default: 3600)
///
/// A missing secret is a startup failure: the service cannot issue or
/// verify tokens without it.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_secs: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl JwtConfig {
    /// Build a config with the default one hour lifetime.
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;

        Ok(Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        let issuer = env_required("JWT_ISSUER")?;
        let audience = env_required("JWT_AUDIENCE")?;

        let ttl_secs: i64 = env_or_default("JWT_TTL_SECS", &DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: format!("{}", e),
            })?;

        if ttl_secs <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: "must be positive".to_string(),
            });
        }

        Ok(Self::new(secret, issuer, audience)?.with_ttl_secs(ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET, "users-api", "users-clients").unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_secs, 3600);
    }

    #[test]
    fn test_jwt_config_new_too_short() {
        let err = JwtConfig::new("short", "iss", "aud").unwrap_err();
        assert!(err.to_string().contains("32 characters"));
    }

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let config = JwtConfig::new(SECRET, "iss", "aud").unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains(SECRET));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ISSUER", Some("users-api")),
                ("JWT_AUDIENCE", Some("users-clients")),
                ("JWT_TTL_SECS", None),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.issuer, "users-api");
                assert_eq!(config.audience, "users-clients");
                assert_eq!(config.ttl_secs, DEFAULT_TOKEN_TTL_SECS);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing_secret() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", None),
                ("JWT_ISSUER", Some("users-api")),
                ("JWT_AUDIENCE", Some("users-clients")),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing_audience() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ISSUER", Some("users-api")),
                ("JWT_AUDIENCE", None),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_AUDIENCE"));
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_rejects_non_positive_ttl() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ISSUER", Some("users-api")),
                ("JWT_AUDIENCE", Some("users-clients")),
                ("JWT_TTL_SECS", Some("0")),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_SECS"));
            },
        );
    }
}
