//! In-memory implementation of AccountDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use vf_shared::types::Contact;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::trait_::AccountDirectory;

/// In-memory account directory for tests and local development
pub struct MockAccountDirectory {
    accounts: Arc<RwLock<HashMap<u64, Account>>>,
    credentials: Arc<RwLock<HashMap<u64, String>>>,
    fail_updates: AtomicBool,
}

impl MockAccountDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            credentials: Arc::new(RwLock::new(HashMap::new())),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Seed an account
    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Last credential hash stored for an account, for assertions
    pub async fn credential(&self, account_id: u64) -> Option<String> {
        self.credentials.read().await.get(&account_id).cloned()
    }

    /// Make subsequent credential updates fail
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.contact == *contact).cloned())
    }

    async fn update_credential(&self, account_id: u64, new_hash: &str) -> Result<(), DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "user store rejected the update".to_string(),
            });
        }

        let accounts = self.accounts.read().await;
        if !accounts.contains_key(&account_id) {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }
        drop(accounts);

        self.credentials
            .write()
            .await
            .insert(account_id, new_hash.to_string());
        Ok(())
    }
}
