//! Integration tests driving the registration and password reset flows
//! end to end over the in-memory stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vf_core::domain::entities::account::Account;
use vf_core::domain::entities::registration_session::{RegistrationSession, SessionStep};
use vf_core::domain::entities::verification_code::Purpose;
use vf_core::errors::{DomainError, VerificationError};
use vf_core::repositories::{MockAccountDirectory, MockCodeStore};
use vf_core::services::password_reset::{PasswordResetService, RESET_REQUESTED_MESSAGE};
use vf_core::services::registration::{
    RegistrationFlow, RegistrationSessionManager, SessionStore,
};
use vf_core::services::verification::{
    NotificationGateway, VerificationConfig, VerificationService,
};
use vf_shared::types::Contact;

// Records delivered codes so the tests can read them back
struct CapturingNotifier {
    sent: Mutex<HashMap<String, String>>,
}

impl CapturingNotifier {
    fn new() -> Self {
        Self {
            sent: Mutex::new(HashMap::new()),
        }
    }

    fn code_for(&self, contact: &Contact) -> Option<String> {
        self.sent.lock().unwrap().get(contact.value()).cloned()
    }
}

#[async_trait]
impl NotificationGateway for CapturingNotifier {
    async fn send_code(
        &self,
        contact: &Contact,
        code: &str,
        _purpose: Purpose,
    ) -> Result<(), String> {
        self.sent
            .lock()
            .unwrap()
            .insert(contact.value().to_string(), code.to_string());
        Ok(())
    }
}

struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, RegistrationSession>>,
}

impl InMemorySessionStore {
    fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session: &RegistrationSession, _ttl_seconds: u64) -> Result<(), String> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<RegistrationSession>, String> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<(), String> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }
}

fn engine(
    store: Arc<MockCodeStore>,
    notifier: Arc<CapturingNotifier>,
    accounts: Arc<MockAccountDirectory>,
) -> VerificationService<MockCodeStore, CapturingNotifier, MockAccountDirectory> {
    VerificationService::new(store, notifier, accounts, VerificationConfig::default())
}

#[tokio::test]
async fn registration_flow_from_start_to_finish() {
    let store = Arc::new(MockCodeStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let accounts = Arc::new(MockAccountDirectory::new());
    let sessions = Arc::new(InMemorySessionStore::new());

    let flow = RegistrationFlow::new(
        engine(store.clone(), notifier.clone(), accounts),
        RegistrationSessionManager::new(sessions),
    );

    let contact = Contact::email("newcomer@example.com");
    let started = flow.start(contact.clone()).await.unwrap();

    let code = notifier.code_for(&contact).unwrap();
    let session = flow.submit_code(&started.session_id, &code).await.unwrap();
    assert!(session.verified);

    let session = flow
        .complete(
            &started.session_id,
            "Jordan Example".to_string(),
            "$2b$12$stand-in-hash".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(session.step, SessionStep::Completed);
    assert_eq!(session.contact, contact);

    flow.finish(&started.session_id).await.unwrap();
    let err = flow
        .submit_code(&started.session_id, &code)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Session(_)));
}

#[tokio::test]
async fn password_reset_flow_spends_the_token_exactly_once() {
    let store = Arc::new(MockCodeStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let accounts = Arc::new(MockAccountDirectory::new());

    let contact = Contact::email("member@example.com");
    accounts
        .insert(Account {
            id: 3,
            contact: contact.clone(),
            full_name: Some("Member".to_string()),
        })
        .await;

    let service = PasswordResetService::with_cost(
        engine(store.clone(), notifier.clone(), accounts.clone()),
        accounts.clone(),
        4,
    );

    service.request_code(&contact).await.unwrap();
    let code = notifier.code_for(&contact).unwrap();

    let verification = service.verify_code(&contact, &code).await.unwrap();
    service
        .reset_password(&contact, &verification.reset_token, "correct horse battery")
        .await
        .unwrap();

    let hash = accounts.credential(3).await.unwrap();
    assert!(bcrypt::verify("correct horse battery", &hash).unwrap());

    let err = service
        .reset_password(&contact, &verification.reset_token, "second attempt")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidResetToken)
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn reset_requests_do_not_reveal_account_existence() {
    let store = Arc::new(MockCodeStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let accounts = Arc::new(MockAccountDirectory::new());

    let member = Contact::email("member@example.com");
    accounts
        .insert(Account {
            id: 3,
            contact: member.clone(),
            full_name: None,
        })
        .await;

    let service = PasswordResetService::with_cost(
        engine(store.clone(), notifier.clone(), accounts.clone()),
        accounts,
        4,
    );

    let for_member = service.request_code(&member).await.unwrap();
    let for_ghost = service
        .request_code(&Contact::email("ghost@example.com"))
        .await
        .unwrap();

    assert_eq!(for_member.message, RESET_REQUESTED_MESSAGE);
    assert_eq!(for_member.message, for_ghost.message);

    // Only the member has a persisted code.
    assert_eq!(store.len().await, 1);
}
