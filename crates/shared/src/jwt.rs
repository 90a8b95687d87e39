//! JWT access token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::JwtConfig;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a service signing with `secret`; tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates a service from the `[jwt]` configuration section.
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        let secs = i64::try_from(config.access_token_expiry_secs).unwrap_or(i64::MAX);
        Self::new(&config.secret, Duration::seconds(secs))
    }

    /// Returns a copy whose tokens live for `ttl` instead.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Generates an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(&self, user_id: Uuid, role: &str) -> Result<String, JwtError> {
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims::new(user_id, role, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, Duration::minutes(15))
    }

    #[test]
    fn test_validate_generated_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id, "approver").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, "approver");
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        assert!(matches!(
            service.validate_token("invalid.token.here"),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = create_test_service().with_ttl(Duration::minutes(-10));

        let token = service.generate_access_token(Uuid::new_v4(), "admin").unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtService::new("another-secret", Duration::minutes(15));
        let token = other.generate_access_token(Uuid::new_v4(), "admin").unwrap();

        assert!(create_test_service().validate_token(&token).is_err());
    }

    #[test]
    fn test_from_config_uses_seconds() {
        let service = JwtService::from_config(&JwtConfig {
            secret: SECRET.to_string(),
            access_token_expiry_secs: 120,
        });
        let token = service.generate_access_token(Uuid::new_v4(), "viewer").unwrap();
        let claims = create_test_service().validate_token(&token).unwrap();

        let remaining = claims.exp - Utc::now().timestamp();
        assert!((110..=120).contains(&remaining));
    }
}
