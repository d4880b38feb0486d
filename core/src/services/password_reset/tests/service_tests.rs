//! Unit tests for the password reset orchestrator

use std::sync::Arc;

use vf_shared::types::Contact;

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, VerificationError};
use crate::repositories::{MockAccountDirectory, MockCodeStore};
use crate::services::password_reset::{PasswordResetService, RESET_REQUESTED_MESSAGE};
use crate::services::verification::{VerificationConfig, VerificationService};

use super::mocks::MockNotifier;

type TestService = PasswordResetService<MockCodeStore, MockNotifier, MockAccountDirectory>;

fn build() -> (
    Arc<MockCodeStore>,
    Arc<MockNotifier>,
    Arc<MockAccountDirectory>,
    TestService,
) {
    let store = Arc::new(MockCodeStore::new());
    let notifier = Arc::new(MockNotifier::new());
    let accounts = Arc::new(MockAccountDirectory::new());
    let engine = VerificationService::new(
        store.clone(),
        notifier.clone(),
        accounts.clone(),
        VerificationConfig::default(),
    );
    // bcrypt's minimum cost keeps the hashing step fast under test
    let service = PasswordResetService::with_cost(engine, accounts.clone(), 4);
    (store, notifier, accounts, service)
}

fn email() -> Contact {
    Contact::email("user@example.com")
}

async fn seed_account(accounts: &MockAccountDirectory) {
    accounts
        .insert(Account {
            id: 7,
            contact: email(),
            full_name: Some("Jordan Example".to_string()),
        })
        .await;
}

#[tokio::test]
async fn unknown_contact_gets_generic_message_and_no_record() {
    let (store, notifier, _, service) = build();

    let outcome = service.request_code(&email()).await.unwrap();
    assert_eq!(outcome.message, RESET_REQUESTED_MESSAGE);
    assert!(store.is_empty().await);
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn known_and_unknown_contacts_get_the_same_message() {
    let (_, notifier, accounts, service) = build();

    let unknown = service
        .request_code(&Contact::email("ghost@example.com"))
        .await
        .unwrap();

    seed_account(&accounts).await;
    let known = service.request_code(&email()).await.unwrap();

    assert_eq!(unknown.message, known.message);
    // Only the registered contact actually received a code.
    assert_eq!(notifier.sent_count(), 1);
    assert!(notifier.last_code_for(&email()).is_some());
}

#[tokio::test]
async fn verify_code_mints_a_reset_token() {
    let (_, notifier, accounts, service) = build();
    seed_account(&accounts).await;

    service.request_code(&email()).await.unwrap();
    let code = notifier.last_code_for(&email()).unwrap();

    let verification = service.verify_code(&email(), &code).await.unwrap();
    assert_eq!(verification.reset_token.len(), 64);
}

#[tokio::test]
async fn wrong_reset_code_is_rejected() {
    let (_, _, accounts, service) = build();
    seed_account(&accounts).await;

    service.request_code(&email()).await.unwrap();
    let err = service.verify_code(&email(), "000000").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidCode)
    ));
}

#[tokio::test]
async fn reset_password_updates_credential_and_spends_token() {
    let (store, notifier, accounts, service) = build();
    seed_account(&accounts).await;

    service.request_code(&email()).await.unwrap();
    let code = notifier.last_code_for(&email()).unwrap();
    let verification = service.verify_code(&email(), &code).await.unwrap();

    service
        .reset_password(&email(), &verification.reset_token, "new-password")
        .await
        .unwrap();

    let hash = accounts.credential(7).await.unwrap();
    assert!(bcrypt::verify("new-password", &hash).unwrap());

    // The token record is gone; a replay is an invalid token.
    assert!(store.is_empty().await);
    let err = service
        .reset_password(&email(), &verification.reset_token, "another-password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn failed_credential_update_leaves_token_retryable() {
    let (_, notifier, accounts, service) = build();
    seed_account(&accounts).await;

    service.request_code(&email()).await.unwrap();
    let code = notifier.last_code_for(&email()).unwrap();
    let verification = service.verify_code(&email(), &code).await.unwrap();

    accounts.set_fail_updates(true);
    let err = service
        .reset_password(&email(), &verification.reset_token, "new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));

    // The token was not consumed by the failed attempt.
    accounts.set_fail_updates(false);
    service
        .reset_password(&email(), &verification.reset_token, "new-password")
        .await
        .unwrap();
    assert!(accounts.credential(7).await.is_some());
}

#[tokio::test]
async fn reset_password_with_bogus_token_is_rejected() {
    let (_, _, accounts, service) = build();
    seed_account(&accounts).await;

    let err = service
        .reset_password(&email(), "not-a-token", "new-password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn request_code_sweeps_stale_records_first() {
    let (store, _, accounts, service) = build();
    seed_account(&accounts).await;

    use crate::repositories::CodeStore;
    use chrono::{Duration, Utc};

    store
        .upsert_active(
            &email(),
            crate::domain::entities::verification_code::Purpose::PasswordReset,
            "111111",
            Utc::now() - Duration::minutes(10),
        )
        .await
        .unwrap();

    service.request_code(&email()).await.unwrap();

    // The stale record was swept and exactly one fresh record remains.
    assert_eq!(store.len().await, 1);
}
