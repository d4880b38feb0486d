//! Registration session manager over a TTL cache.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info};

use vf_shared::types::Contact;

use crate::domain::entities::registration_session::{
    RegistrationSession, SESSION_TTL_SECONDS,
};
use crate::errors::{DomainError, DomainResult, SessionError};

use super::traits::SessionStore;

/// Manages short-lived registration sessions.
///
/// Every write refreshes the TTL, so a slow multi-step client keeps its
/// session alive without a heartbeat. Concurrent writers to the same session
/// are last-write-wins; the flow is single-user, single-device.
pub struct RegistrationSessionManager<C: SessionStore> {
    sessions: Arc<C>,
    ttl_seconds: u64,
}

impl<C: SessionStore> RegistrationSessionManager<C> {
    /// Create a manager with the default 30-minute session TTL
    pub fn new(sessions: Arc<C>) -> Self {
        Self::with_ttl(sessions, SESSION_TTL_SECONDS)
    }

    /// Create a manager with a custom session TTL
    pub fn with_ttl(sessions: Arc<C>, ttl_seconds: u64) -> Self {
        Self {
            sessions,
            ttl_seconds,
        }
    }

    /// Open a new session for `contact` at the `Initiated` step
    pub async fn create_session(&self, contact: Contact) -> DomainResult<String> {
        let session_id = new_session_id();
        let session = RegistrationSession::new(session_id.clone(), contact);

        self.sessions
            .put(&session, self.ttl_seconds)
            .await
            .map_err(store_err)?;

        info!(
            session = %session_tag(&session_id),
            channel = %session.channel(),
            event = "session_created",
            "Opened registration session"
        );

        Ok(session_id)
    }

    /// Fetch a live session; absence and expiry are indistinguishable
    pub async fn get_session(&self, session_id: &str) -> DomainResult<RegistrationSession> {
        self.sessions
            .get(session_id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| SessionError::SessionNotFound.into())
    }

    /// Record a successful code validation and refresh the TTL
    pub async fn mark_verified(&self, session_id: &str) -> DomainResult<RegistrationSession> {
        let mut session = self.get_session(session_id).await?;
        session.mark_verified();

        self.sessions
            .put(&session, self.ttl_seconds)
            .await
            .map_err(store_err)?;

        debug!(session = %session_tag(session_id), event = "session_verified", "Session marked verified");
        Ok(session)
    }

    /// Record the chosen profile on a verified session
    pub async fn complete_session(
        &self,
        session_id: &str,
        full_name: String,
        password_hash: String,
    ) -> DomainResult<RegistrationSession> {
        let mut session = self.get_session(session_id).await?;

        if !session.verified {
            return Err(SessionError::VerificationRequired.into());
        }

        session.complete(full_name, password_hash);

        self.sessions
            .put(&session, self.ttl_seconds)
            .await
            .map_err(store_err)?;

        info!(session = %session_tag(session_id), event = "session_completed", "Registration session completed");
        Ok(session)
    }

    /// Explicit teardown once registration is durably persisted
    pub async fn delete_session(&self, session_id: &str) -> DomainResult<()> {
        self.sessions.remove(session_id).await.map_err(store_err)
    }
}

// 16 random bytes, hex-encoded: the session's sole external handle
fn new_session_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// Session ids are secrets; only a short prefix ever reaches a log line
fn session_tag(session_id: &str) -> &str {
    &session_id[..session_id.len().min(8)]
}

fn store_err(message: String) -> DomainError {
    DomainError::StoreUnavailable { message }
}
