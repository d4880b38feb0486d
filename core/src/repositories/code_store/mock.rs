//! In-memory implementation of CodeStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use vf_shared::types::Contact;

use crate::domain::entities::verification_code::{Purpose, VerificationCode};
use crate::errors::DomainError;

use super::trait_::CodeStore;

/// In-memory code store for tests and local development
pub struct MockCodeStore {
    records: Arc<RwLock<HashMap<u64, VerificationCode>>>,
    next_id: AtomicU64,
}

impl MockCodeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of records currently held, for assertions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Fetch a record by id, for assertions
    pub async fn get(&self, id: u64) -> Option<VerificationCode> {
        self.records.read().await.get(&id).cloned()
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl Default for MockCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn upsert_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, DomainError> {
        let mut records = self.records.write().await;

        records.retain(|_, r| !(!r.verified && r.contact == *contact && r.purpose == purpose));

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record =
            VerificationCode::new(id, contact.clone(), purpose, code.to_string(), expires_at);
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| !r.verified && r.contact == *contact && r.purpose == purpose)
            .cloned())
    }

    async fn find_verified(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| {
                r.verified && !r.is_expired() && r.contact == *contact && r.purpose == purpose
            })
            .cloned())
    }

    async fn increment_attempt(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records
            .values_mut()
            .find(|r| !r.verified && r.contact == *contact && r.purpose == purpose)
        {
            record.attempt_count += 1;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_verified(&self, id: u64) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.verified = true;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn issue_reset_token(&self, id: u64) -> Result<String, DomainError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "VerificationCode".to_string(),
        })?;
        let token = Self::generate_token();
        record.reset_token = Some(token.clone());
        record.token_used = false;
        record.updated_at = Utc::now();
        Ok(token)
    }

    async fn find_by_reset_token(
        &self,
        contact: &Contact,
        token: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| {
                r.verified
                    && !r.token_used
                    && !r.is_expired()
                    && r.contact == *contact
                    && r.reset_token.as_deref() == Some(token)
            })
            .cloned())
    }

    async fn mark_used_and_delete(&self, id: u64) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.token_used = true;
        }
        records.remove(&id);
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn delete_expired_and_used(
        &self,
        contact: Option<&Contact>,
    ) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| {
            let in_scope = contact.map_or(true, |c| r.contact == *c);
            !(in_scope && (r.is_expired() || r.token_used))
        });
        Ok((before - records.len()) as u64)
    }
}
