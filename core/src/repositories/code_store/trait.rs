//! Code store trait defining persistence for verification-code records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vf_shared::types::Contact;

use crate::domain::entities::verification_code::{Purpose, VerificationCode};
use crate::errors::DomainError;

/// Persistence contract for verification-code records
///
/// Implementations own the "one unverified record per `(contact, purpose)`"
/// invariant: `upsert_active` supersedes any previous unverified record for
/// the key before inserting, and the delete-then-insert sequence must be at
/// least serializable per key.
///
/// Every operation may fail with [`DomainError::StoreUnavailable`]; callers
/// treat that as non-retryable for the current request.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Replace any unverified record for `(contact, purpose)` with a fresh
    /// one carrying `attempt_count = 0`.
    async fn upsert_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, DomainError>;

    /// The current unverified record for `(contact, purpose)`, if any.
    ///
    /// Expiry and the attempt cap are deliberately not filtered here: the
    /// verification engine checks both itself so the caller gets a precise
    /// failure (`CodeExpired`, `TooManyAttempts`) instead of a generic miss.
    async fn find_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// The verified, unexpired record for `(contact, purpose)`, if any.
    async fn find_verified(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Add one to the attempt counter of the current unverified record for
    /// the key.
    async fn increment_attempt(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<(), DomainError>;

    /// Flip `verified` to true. Terminal for the code itself.
    async fn mark_verified(&self, id: u64) -> Result<(), DomainError>;

    /// Generate, store, and return a unique single-use reset token for the
    /// record, with `token_used = false`.
    async fn issue_reset_token(&self, id: u64) -> Result<String, DomainError>;

    /// The verified, unused, unexpired record carrying `token` for `contact`.
    async fn find_by_reset_token(
        &self,
        contact: &Contact,
        token: &str,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Flip `token_used` to true, then delete the record. The flip must
    /// happen before the delete so a crash between the two never leaves a
    /// reusable unused token behind.
    async fn mark_used_and_delete(&self, id: u64) -> Result<(), DomainError>;

    /// Remove a single record. Rollback hook for a code whose delivery
    /// failed.
    async fn delete(&self, id: u64) -> Result<(), DomainError>;

    /// Delete expired and used records, optionally scoped to one contact.
    /// Returns the number of records removed.
    async fn delete_expired_and_used(
        &self,
        contact: Option<&Contact>,
    ) -> Result<u64, DomainError>;
}
