//! Type-safe error codes for API responses.
//!
//! Each code carries a client-facing identifier (e.g. "UNAUTHORIZED"), an
//! integer for logs and monitoring (e.g. 1006) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Unauthorized;
//! assert_eq!(code.as_str(), "UNAUTHORIZED");
//! assert_eq!(code.code(), 1006);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Path parameter failed to parse (e.g. a non-integer id)
    PathExtraction,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// No route matches the request path
    NotFound,

    /// Bearer token missing, malformed or expired
    Unauthorized,

    /// Route exists but not for this method
    MethodNotAllowed,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PathExtraction => "PATH_EXTRACTION",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    /// Integer code used in structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::PathExtraction => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::MethodNotAllowed => 1007,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::PathExtraction => "Invalid path parameter",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::Unauthorized => "Authentication required",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
