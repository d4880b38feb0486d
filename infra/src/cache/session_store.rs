//! Redis-backed registration session store.

use async_trait::async_trait;
use tracing::debug;

use vf_core::domain::entities::registration_session::RegistrationSession;
use vf_core::services::registration::SessionStore;

use super::redis_client::RedisClient;

const SESSION_PREFIX: &str = "reg_session:";

/// Registration sessions live under `reg_session:{id}` as JSON with a
/// sliding TTL; key absence is the authoritative expiry signal.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    /// Create a new session store over an existing client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", SESSION_PREFIX, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &RegistrationSession, ttl_seconds: u64) -> Result<(), String> {
        let payload = serde_json::to_string(session).map_err(|e| e.to_string())?;
        self.client
            .set_with_expiry(&Self::key(&session.session_id), &payload, ttl_seconds)
            .await
            .map_err(|e| e.to_string())?;
        debug!("Stored registration session with ttl {}s", ttl_seconds);
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<RegistrationSession>, String> {
        let raw = self
            .client
            .get(&Self::key(session_id))
            .await
            .map_err(|e| e.to_string())?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| e.to_string()),
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> Result<(), String> {
        self.client
            .delete(&Self::key(session_id))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
