//! # Axum Helpers
//!
//! Cross-cutting pieces shared by the HTTP services in this workspace.
//!
//! - **[`auth`]**: HS256 bearer tokens (issue, verify) and the request gate
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: security headers and CORS
//! - **[`errors`]**: structured error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes)?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &ServerConfig::default(), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{JwtAuth, JwtClaims, JwtConfig, TokenError, jwt_auth_middleware};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};
