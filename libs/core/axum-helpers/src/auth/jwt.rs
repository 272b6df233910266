use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (authenticated username)
    pub jti: String, // Unique token id
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Stateless HS256 token issuer and verifier.
///
/// No server-side session state is kept: a token stays valid until its
/// `exp`, judged only by signature, issuer, audience and expiry.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        // Expiry is exact, no grace period
        validation.leeway = 0;

        let keys = Keys {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        };

        tracing::info!(issuer = %config.issuer, audience = %config.audience, ttl_secs = config.ttl_secs, "JWT auth initialized");
        Self {
            keys: Arc::new(keys),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::seconds(config.ttl_secs),
        }
    }

    /// Sign a token for `subject`, valid from now for the configured lifetime.
    pub fn create_token(&self, subject: &str) -> Result<String, TokenError> {
        self.create_token_at(subject, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn create_token_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = JwtClaims {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(TokenError::Signing)
    }

    /// Check signature, issuer, audience and expiry; return the claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, TokenError> {
        decode::<JwtClaims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    TokenError::Expired
                } else {
                    TokenError::Invalid(e)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET, "users-api", "users-clients").unwrap())
    }

    #[test]
    fn test_token_round_trip_carries_subject() {
        let auth = auth();
        let token = auth.create_token("admin").unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "users-api");
        assert_eq!(claims.aud, "users-clients");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let auth = auth();
        let first = auth.verify_token(&auth.create_token("admin").unwrap()).unwrap();
        let second = auth.verify_token(&auth.create_token("admin").unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_token_accepted_just_before_expiry() {
        let auth = auth();
        let token = auth
            .create_token_at("admin", Utc::now() - Duration::minutes(59))
            .unwrap();

        assert!(auth.verify_token(&token).is_ok());
    }

    #[test]
    fn test_token_rejected_after_expiry() {
        let auth = auth();
        let token = auth
            .create_token_at("admin", Utc::now() - Duration::minutes(61))
            .unwrap();

        assert!(matches!(auth.verify_token(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_token_signed_with_other_key_is_rejected() {
        let other = JwtAuth::new(
            &JwtConfig::new("another-secret-key-that-is-32-chars-long", "users-api", "users-clients")
                .unwrap(),
        );
        let token = other.create_token("admin").unwrap();

        assert!(matches!(auth().verify_token(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let foreign = JwtAuth::new(&JwtConfig::new(SECRET, "someone-else", "users-clients").unwrap());
        let token = foreign.create_token("admin").unwrap();

        assert!(matches!(auth().verify_token(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let foreign = JwtAuth::new(&JwtConfig::new(SECRET, "users-api", "other-clients").unwrap());
        let token = foreign.create_token("admin").unwrap();

        assert!(matches!(auth().verify_token(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            auth().verify_token("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }
}
