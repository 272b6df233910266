use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Environment variable holding the single allowed browser origin
pub const CORS_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// CORS layer for the API.
///
/// Allows the CRUD verbs plus `Content-Type`, `Authorization` and `Accept`
/// headers from `allowed_origin`, caching preflights for an hour.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Returns `Ok(None)` when the variable is unset, so same-origin deployments
/// carry no CORS layer at all.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(origin) = std::env::var(CORS_ORIGIN_ENV) else {
        return Ok(None);
    };

    let value = HeaderValue::from_str(origin.trim()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid {}: {}", CORS_ORIGIN_ENV, e),
        )
    })?;

    tracing::info!(origin = %origin, "CORS enabled");
    Ok(Some(create_cors_layer(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_disabled_when_unset() {
        temp_env::with_var_unset(CORS_ORIGIN_ENV, || {
            assert!(cors_layer_from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_cors_enabled_with_origin() {
        temp_env::with_var(CORS_ORIGIN_ENV, Some("http://localhost:3000"), || {
            assert!(cors_layer_from_env().unwrap().is_some());
        });
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        temp_env::with_var(CORS_ORIGIN_ENV, Some("http://bad\norigin"), || {
            let err = cors_layer_from_env().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        });
    }
}
