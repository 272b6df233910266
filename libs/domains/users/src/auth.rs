//! Login: credential check and token issuance.
//!
//! The credential policy sits behind [`CredentialVerifier`] so a real
//! credential store can replace [`StaticCredentials`] without touching
//! handlers or the token code. Presented tokens are checked by
//! [`JwtAuth::verify_token`], the same key set that signs them here, which
//! is what `axum_helpers::jwt_auth_middleware` runs in front of `/users`.

use axum_helpers::JwtAuth;
use core_config::{ConfigError, FromEnv, env_or_default};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "1234";

/// Decides whether a username/password pair may log in
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair, compared exactly.
///
/// Environment variables:
/// - `AUTH_USERNAME` (default: admin)
/// - `AUTH_PASSWORD` (default: 1234)
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FromEnv for StaticCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_or_default("AUTH_USERNAME", DEFAULT_USERNAME),
            env_or_default("AUTH_PASSWORD", DEFAULT_PASSWORD),
        ))
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Issues tokens for valid credentials.
pub struct AuthService<C: CredentialVerifier = StaticCredentials> {
    credentials: Arc<C>,
    jwt: JwtAuth,
}

impl<C: CredentialVerifier> Clone for AuthService<C> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            jwt: self.jwt.clone(),
        }
    }
}

impl<C: CredentialVerifier> AuthService<C> {
    pub fn new(credentials: C, jwt: JwtAuth) -> Self {
        Self {
            credentials: Arc::new(credentials),
            jwt,
        }
    }

    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    /// Check the pair and sign a token whose subject is the username.
    ///
    /// A mismatch never says which field was wrong.
    #[instrument(skip(self, request), fields(username = %request.username()))]
    pub fn login(&self, request: &LoginRequest) -> UserResult<LoginResponse> {
        info!("Login attempt.");

        if request.username.is_none() || request.password.is_none() {
            warn!("Login body is missing username or password.");
            return Err(UserError::InvalidCredentials);
        }

        if !self.credentials.verify(request.username(), request.password()) {
            warn!("Invalid credentials.");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.jwt.create_token(request.username()).map_err(|e| {
            error!(error = %e, "Failed to issue token");
            UserError::Internal(e.to_string())
        })?;

        info!("Issued token.");
        Ok(LoginResponse { token })
    }
}
