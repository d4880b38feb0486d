//! End-to-end registration flow threading the verification engine through a
//! cache-backed session.

use chrono::{DateTime, Utc};

use vf_shared::types::Contact;

use crate::domain::entities::registration_session::RegistrationSession;
use crate::domain::entities::verification_code::Purpose;
use crate::errors::DomainResult;
use crate::repositories::{AccountDirectory, CodeStore};
use crate::services::verification::{NotificationGateway, VerificationService};

use super::service::RegistrationSessionManager;
use super::traits::SessionStore;

/// Result of opening a registration flow
#[derive(Debug, Clone)]
pub struct StartedRegistration {
    /// Handle for the subsequent verify and complete steps
    pub session_id: String,
    /// Caller-facing confirmation message
    pub message: String,
    /// When the delivered code stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Composes the verification engine and the session manager into the
/// three-step registration flow: start, submit code, complete.
///
/// Completion hands the accumulated session data back to the caller; durable
/// account creation belongs to the user store, after which the caller tears
/// the session down with [`RegistrationFlow::finish`].
pub struct RegistrationFlow<S, N, A, C>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
    C: SessionStore,
{
    engine: VerificationService<S, N, A>,
    sessions: RegistrationSessionManager<C>,
}

impl<S, N, A, C> RegistrationFlow<S, N, A, C>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
    C: SessionStore,
{
    /// Build a flow from its two collaborators
    pub fn new(
        engine: VerificationService<S, N, A>,
        sessions: RegistrationSessionManager<C>,
    ) -> Self {
        Self { engine, sessions }
    }

    /// Open a session and send a registration code in one step.
    ///
    /// If issuing fails (contact taken, delivery failure), the freshly opened
    /// session is torn down again so no dangling session outlives the error.
    pub async fn start(&self, contact: Contact) -> DomainResult<StartedRegistration> {
        let session_id = self.sessions.create_session(contact.clone()).await?;

        match self.engine.issue(&contact, Purpose::Registration).await {
            Ok(outcome) => Ok(StartedRegistration {
                session_id,
                message: outcome.message,
                expires_at: outcome.expires_at,
            }),
            Err(e) => {
                let _ = self.sessions.delete_session(&session_id).await;
                Err(e)
            }
        }
    }

    /// Validate a submitted code and advance the session to `Verified`
    pub async fn submit_code(
        &self,
        session_id: &str,
        code: &str,
    ) -> DomainResult<RegistrationSession> {
        let session = self.sessions.get_session(session_id).await?;
        self.engine
            .validate(&session.contact, Purpose::Registration, code)
            .await?;
        self.sessions.mark_verified(session_id).await
    }

    /// Record the chosen profile on a verified session and hand the
    /// accumulated data back for durable persistence
    pub async fn complete(
        &self,
        session_id: &str,
        full_name: String,
        password_hash: String,
    ) -> DomainResult<RegistrationSession> {
        self.sessions
            .complete_session(session_id, full_name, password_hash)
            .await
    }

    /// Tear the session down once registration is durably persisted
    pub async fn finish(&self, session_id: &str) -> DomainResult<()> {
        self.sessions.delete_session(session_id).await
    }
}
