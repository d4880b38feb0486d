//! Redis-backed access-token revocation store.

use async_trait::async_trait;

use vf_core::services::token::RevocationStore;

use super::redis_client::RedisClient;

const REVOKED_PREFIX: &str = "revoked_jti:";

/// Revoked token ids live under `revoked_jti:{jti}` with a TTL equal to the
/// token's remaining lifetime; key presence is the revocation itself, so
/// every process instance sharing the cache sees the same state.
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    /// Create a new revocation store over an existing client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(jti: &str) -> String {
        format!("{}{}", REVOKED_PREFIX, jti)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(&Self::key(jti), "1", ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, String> {
        self.client
            .exists(&Self::key(jti))
            .await
            .map_err(|e| e.to_string())
    }
}
