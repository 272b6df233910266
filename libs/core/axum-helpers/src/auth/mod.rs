//! Bearer token authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens (subject, jti, issuer,
//!   audience, expiry)
//! - [`jwt_auth_middleware`] gates routes on a valid `Authorization: Bearer` header
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/users", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TokenError};
pub use middleware::jwt_auth_middleware;
