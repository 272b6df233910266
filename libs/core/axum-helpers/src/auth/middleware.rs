use super::jwt::{JwtAuth, TokenError};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| {
            let (scheme, token) = auth.split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty())
}

/// Bearer token gate.
///
/// Rejects with 401 when the header is missing or the token fails signature,
/// issuer, audience or expiry checks. On success the verified
/// [`JwtClaims`](super::JwtClaims) are inserted into request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/users", get(list_users))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("No token provided".to_string()));
    };

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        match e {
            TokenError::Expired => AppError::Unauthorized("Token has expired".to_string()),
            _ => AppError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    tracing::debug!(sub = %claims.sub, jti = %claims.jti, "Bearer token accepted");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{Extension, Router, body::Body, http::StatusCode, routing::get};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(
            &JwtConfig::new("test-secret-key-that-is-at-least-32-chars", "users-api", "users-clients")
                .unwrap(),
        )
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<JwtClaims>| async move { claims.sub }),
            )
            .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    fn request(authorization: Option<String>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, "bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, "Basic YWRtaW46MTIzNA==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let response = app(auth()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let auth = auth();
        let token = auth.create_token("admin").unwrap();

        let response = app(auth)
            .oneshot(request(Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"admin");
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let auth = auth();
        let token = auth
            .create_token_at("admin", Utc::now() - Duration::minutes(61))
            .unwrap();

        let response = app(auth)
            .oneshot(request(Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "UNAUTHORIZED");
        assert_eq!(json["message"], "Token has expired");
    }

    #[tokio::test]
    async fn test_tampered_token_is_unauthorized() {
        let auth = auth();
        let mut token = auth.create_token("admin").unwrap();
        token.push('x');

        let response = app(auth)
            .oneshot(request(Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
