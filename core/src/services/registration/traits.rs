//! Cache integration trait for registration sessions.

use async_trait::async_trait;

use crate::domain::entities::registration_session::RegistrationSession;

/// TTL-bearing cache for registration sessions
///
/// The session manager exclusively owns the namespace behind this trait; no
/// other component reads or writes it. Expiry is the cache's job: a session
/// past its TTL is a plain miss on `get`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store or overwrite a session, resetting its TTL
    async fn put(&self, session: &RegistrationSession, ttl_seconds: u64) -> Result<(), String>;

    /// Fetch a live session
    async fn get(&self, session_id: &str) -> Result<Option<RegistrationSession>, String>;

    /// Drop a session
    async fn remove(&self, session_id: &str) -> Result<(), String>;
}
