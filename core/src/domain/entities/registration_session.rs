//! Registration session entity, cache-backed with a sliding TTL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vf_shared::types::{Channel, Contact};

/// Default session lifetime (30 minutes), refreshed on every write
pub const SESSION_TTL_SECONDS: u64 = 30 * 60;

/// Progress of a registration flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    Initiated,
    Verified,
    Completed,
}

/// A short-lived registration session threading the initiate -> verify ->
/// complete flow. The cache TTL is the authoritative expiry; an absent
/// session and an expired session are indistinguishable by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSession {
    /// Opaque handle, the sole external reference to the session
    pub session_id: String,

    /// Contact being registered
    pub contact: Contact,

    /// Current step of the flow
    pub step: SessionStep,

    /// Whether the contact has been verified via a code
    pub verified: bool,

    /// Display name collected at completion
    pub full_name: Option<String>,

    /// Credential hash collected at completion
    pub password_hash: Option<String>,

    /// Timestamp when the session was opened
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation
    pub updated_at: DateTime<Utc>,
}

impl RegistrationSession {
    /// Open a new session at the `Initiated` step
    pub fn new(session_id: String, contact: Contact) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            contact,
            step: SessionStep::Initiated,
            verified: false,
            full_name: None,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Delivery channel of the contact under registration
    pub fn channel(&self) -> Channel {
        self.contact.channel()
    }

    /// Record a successful code validation
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.step = SessionStep::Verified;
        self.updated_at = Utc::now();
    }

    /// Record the chosen profile and close out the flow
    pub fn complete(&mut self, full_name: String, password_hash: String) {
        self.full_name = Some(full_name);
        self.password_hash = Some(password_hash);
        self.step = SessionStep::Completed;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_initiated() {
        let session =
            RegistrationSession::new("abc123".to_string(), Contact::email("user@example.com"));
        assert_eq!(session.step, SessionStep::Initiated);
        assert!(!session.verified);
        assert!(session.full_name.is_none());
    }

    #[test]
    fn mark_verified_advances_step() {
        let mut session =
            RegistrationSession::new("abc123".to_string(), Contact::phone("+61412345678"));
        session.mark_verified();
        assert!(session.verified);
        assert_eq!(session.step, SessionStep::Verified);
    }

    #[test]
    fn complete_records_profile() {
        let mut session =
            RegistrationSession::new("abc123".to_string(), Contact::email("user@example.com"));
        session.mark_verified();
        session.complete("Jordan Example".to_string(), "$2b$12$hash".to_string());
        assert_eq!(session.step, SessionStep::Completed);
        assert_eq!(session.full_name.as_deref(), Some("Jordan Example"));
        assert_eq!(session.password_hash.as_deref(), Some("$2b$12$hash"));
    }

    #[test]
    fn session_survives_json_round_trip() {
        let mut session =
            RegistrationSession::new("abc123".to_string(), Contact::email("user@example.com"));
        session.mark_verified();

        let json = serde_json::to_string(&session).unwrap();
        let restored: RegistrationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, restored);
    }
}
