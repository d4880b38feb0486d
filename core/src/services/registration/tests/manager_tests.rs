//! Unit tests for the registration session manager

use std::sync::Arc;

use vf_shared::types::Contact;

use crate::domain::entities::registration_session::SessionStep;
use crate::errors::{DomainError, SessionError};
use crate::services::registration::RegistrationSessionManager;

use super::mocks::MockSessionStore;

fn manager() -> (Arc<MockSessionStore>, RegistrationSessionManager<MockSessionStore>) {
    let store = Arc::new(MockSessionStore::new(false));
    let manager = RegistrationSessionManager::new(store.clone());
    (store, manager)
}

fn email() -> Contact {
    Contact::email("user@example.com")
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let (_, manager) = manager();

    let session_id = manager.create_session(email()).await.unwrap();
    assert_eq!(session_id.len(), 32);

    let session = manager.get_session(&session_id).await.unwrap();
    assert_eq!(session.contact, email());
    assert_eq!(session.step, SessionStep::Initiated);
    assert!(!session.verified);
}

#[tokio::test]
async fn session_ids_are_unique() {
    let (_, manager) = manager();

    let a = manager.create_session(email()).await.unwrap();
    let b = manager.create_session(email()).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn missing_session_reports_not_found() {
    let (_, manager) = manager();

    let err = manager.get_session("deadbeefdeadbeef").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Session(SessionError::SessionNotFound)
    ));
}

#[tokio::test]
async fn complete_before_verify_is_rejected() {
    let (_, manager) = manager();

    let session_id = manager.create_session(email()).await.unwrap();
    let err = manager
        .complete_session(&session_id, "Jordan".to_string(), "$2b$12$hash".to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Session(SessionError::VerificationRequired)
    ));
}

#[tokio::test]
async fn verify_then_complete_accumulates_profile() {
    let (_, manager) = manager();

    let session_id = manager.create_session(email()).await.unwrap();
    let session = manager.mark_verified(&session_id).await.unwrap();
    assert!(session.verified);
    assert_eq!(session.step, SessionStep::Verified);

    let session = manager
        .complete_session(&session_id, "Jordan".to_string(), "$2b$12$hash".to_string())
        .await
        .unwrap();
    assert_eq!(session.step, SessionStep::Completed);
    assert_eq!(session.full_name.as_deref(), Some("Jordan"));
    assert_eq!(session.password_hash.as_deref(), Some("$2b$12$hash"));
}

#[tokio::test]
async fn delete_makes_session_unreachable() {
    let (store, manager) = manager();

    let session_id = manager.create_session(email()).await.unwrap();
    manager.delete_session(&session_id).await.unwrap();

    assert_eq!(store.len(), 0);
    let err = manager.get_session(&session_id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Session(SessionError::SessionNotFound)
    ));
}

#[tokio::test]
async fn store_failures_surface_as_unavailable() {
    let store = Arc::new(MockSessionStore::new(true));
    let manager = RegistrationSessionManager::new(store);

    let err = manager.create_session(email()).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
}
