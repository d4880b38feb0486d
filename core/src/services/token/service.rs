//! Main token service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenConfig;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued to
    pub sub: String,
    /// Random token id; revocation is keyed on this
    pub jti: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Shared revocation state for issued tokens
///
/// Entries live only as long as the token they revoke; once the token has
/// expired on its own, the entry is moot and the cache drops it. Because the
/// state lives in a shared store rather than process memory, every instance
/// sees the same revocations.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token id as revoked for `ttl_seconds`
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Whether a token id has been revoked
    async fn is_revoked(&self, jti: &str) -> Result<bool, String>;
}

/// Service for signing, verifying, and revoking access tokens
pub struct TokenService<R: RevocationStore> {
    revocations: Arc<R>,
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: RevocationStore> TokenService<R> {
    /// Create a new token service
    pub fn new(revocations: Arc<R>, config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.clone()]);
        validation.validate_exp = true;

        Self {
            revocations,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign a token for `subject`.
    ///
    /// The token id is drawn at random, so instances never coordinate on id
    /// assignment.
    pub fn sign(&self, subject: &str) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.access_token_minutes)).timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Decode and check a token, including shared revocation state
    pub async fn verify(&self, token: &str) -> DomainResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            DomainError::from(match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })
        })?;

        let revoked = self
            .revocations
            .is_revoked(&data.claims.jti)
            .await
            .map_err(|message| DomainError::StoreUnavailable { message })?;

        if revoked {
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(data.claims)
    }

    /// Revoke a token for the remainder of its lifetime
    pub async fn revoke(&self, token: &str) -> DomainResult<()> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            DomainError::from(match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })
        })?;

        let remaining = (data.claims.exp - Utc::now().timestamp()).max(1) as u64;
        self.revocations
            .revoke(&data.claims.jti, remaining)
            .await
            .map_err(|message| DomainError::StoreUnavailable { message })?;

        info!(
            jti = %data.claims.jti,
            event = "token_revoked",
            "Revoked access token"
        );

        Ok(())
    }
}
