//! Account directory trait over the external user store.

use async_trait::async_trait;

use vf_shared::types::Contact;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Read-and-update view of the external user store
///
/// The verification core never creates accounts; it only checks whether a
/// contact is already registered and, in the reset flow, replaces an
/// account's credential hash.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Look up a registered account by its email or phone contact
    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Account>, DomainError>;

    /// Replace the stored credential hash for an account
    async fn update_credential(&self, account_id: u64, new_hash: &str) -> Result<(), DomainError>;
}
