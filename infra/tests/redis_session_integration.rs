//! Integration tests for the Redis session and revocation stores.
//!
//! These tests require a running Redis instance.
//! Run with: cargo test -p vf_infra --test redis_session_integration -- --ignored

use std::time::Duration;

use vf_core::domain::entities::registration_session::RegistrationSession;
use vf_core::services::registration::SessionStore;
use vf_core::services::token::RevocationStore;
use vf_infra::cache::{CacheConfig, RedisClient, RedisRevocationStore, RedisSessionStore};
use vf_shared::types::Contact;

async fn client() -> RedisClient {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    RedisClient::connect(&config)
        .await
        .expect("Failed to connect to Redis")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn session_round_trip_and_removal() {
    let store = RedisSessionStore::new(client().await);

    let session = RegistrationSession::new(
        "it-session-roundtrip".to_string(),
        Contact::email("user@example.com"),
    );

    store.put(&session, 60).await.unwrap();
    let loaded = store.get(&session.session_id).await.unwrap().unwrap();
    assert_eq!(loaded, session);

    store.remove(&session.session_id).await.unwrap();
    assert!(store.get(&session.session_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn session_expires_with_its_ttl() {
    let store = RedisSessionStore::new(client().await);

    let session = RegistrationSession::new(
        "it-session-ttl".to_string(),
        Contact::phone("+61412345678"),
    );

    store.put(&session, 1).await.unwrap();
    assert!(store.get(&session.session_id).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(store.get(&session.session_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn put_refreshes_the_ttl() {
    let store = RedisSessionStore::new(client().await);

    let mut session = RegistrationSession::new(
        "it-session-refresh".to_string(),
        Contact::email("user@example.com"),
    );

    store.put(&session, 2).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // The rewrite resets the clock, so the session outlives its original TTL.
    session.mark_verified();
    store.put(&session, 2).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let loaded = store.get(&session.session_id).await.unwrap().unwrap();
    assert!(loaded.verified);

    store.remove(&session.session_id).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn revocation_round_trip() {
    let store = RedisRevocationStore::new(client().await);

    assert!(!store.is_revoked("it-jti-1").await.unwrap());
    store.revoke("it-jti-1", 60).await.unwrap();
    assert!(store.is_revoked("it-jti-1").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn revocation_lapses_with_token_lifetime() {
    let store = RedisRevocationStore::new(client().await);

    store.revoke("it-jti-short", 1).await.unwrap();
    assert!(store.is_revoked("it-jti-short").await.unwrap());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!store.is_revoked("it-jti-short").await.unwrap());
}
