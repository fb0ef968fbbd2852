//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation and validation for the two-tier design: short-lived
//! stateless access tokens and longer-lived refresh tokens signed with a
//! distinct secret. Refresh tokens carry a random nonce so that two tokens
//! issued in the same instant for the same user still differ.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Claims carried by a refresh token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    /// Random disambiguator; makes rapid re-issuance produce distinct tokens.
    pub nonce: u32,
    pub exp: usize,
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens.
///
/// Both secrets and both lifetimes are captured once at construction from the
/// provided [`Config`].
pub struct JwtUtils {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
    validation: Validation,
}

impl JwtUtils {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            access_encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl_seconds: config.jwt_expires_in_seconds,
            refresh_ttl_seconds: config.refresh_token_expires_in_seconds,
            validation,
        }
    }

    /// Signs a short-lived access token for the given user.
    pub fn issue_access_token(&self, user_id: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_ttl_seconds as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Signs a refresh token for the given user (longer expiration, distinct
    /// secret, random nonce).
    pub fn issue_refresh_token(&self, user_id: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.refresh_ttl_seconds as i64);

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            nonce: rand::random::<u32>(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|e| ServiceError::internal(format!("Refresh token generation failed: {}", e)))
    }

    /// Validates and decodes an access token.
    pub fn validate_access_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.access_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::InvalidToken)
    }

    /// Validates and decodes a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> ServiceResult<RefreshClaims> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::InvalidToken)
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "access-secret".to_string(),
            jwt_expires_in_seconds: 900,
            refresh_token_secret: "refresh-secret".to_string(),
            refresh_token_expires_in_seconds: 3600,
            server_port: 0,
        }
    }

    #[test]
    fn access_token_round_trip() {
        let jwt = JwtUtils::new(&test_config());
        let token = jwt.issue_access_token("user-1").unwrap();
        let claims = jwt.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn refresh_tokens_issued_together_differ() {
        let jwt = JwtUtils::new(&test_config());
        let a = jwt.issue_refresh_token("user-1").unwrap();
        let b = jwt.issue_refresh_token("user-1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn access_and_refresh_secrets_are_not_interchangeable() {
        let jwt = JwtUtils::new(&test_config());
        let refresh = jwt.issue_refresh_token("user-1").unwrap();
        assert!(jwt.validate_access_token(&refresh).is_err());

        let access = jwt.issue_access_token("user-1").unwrap();
        assert!(jwt.validate_refresh_token(&access).is_err());
    }

    #[test]
    fn expired_refresh_token_is_rejected() {
        let config = test_config();
        let jwt = JwtUtils::new(&config);

        // Encode a token whose expiry is well past the default leeway.
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: "user-1".to_string(),
            nonce: 7,
            exp: (now - Duration::seconds(120)).timestamp() as usize,
            iat: (now - Duration::seconds(240)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
        )
        .unwrap();

        assert!(jwt.validate_refresh_token(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        let mut token = jwt.issue_access_token("user-1").unwrap();
        token.push('x');
        assert!(jwt.validate_access_token(&token).is_err());
    }
}
