//! Main verification engine implementation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use tracing::{info, warn};

use vf_shared::types::Contact;
use vf_shared::utils::validation::{is_valid_email, is_valid_phone};

use crate::domain::entities::verification_code::{Purpose, VerificationCode};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{AccountDirectory, CodeStore};

use super::config::VerificationConfig;
use super::generator::CodeGenerator;
use super::traits::NotificationGateway;
use super::types::IssueOutcome;

/// Verification engine orchestrating code issue, validation, and reset
/// tokens over the code store
pub struct VerificationService<S, N, A>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
{
    /// Persistence for code records
    store: Arc<S>,
    /// Outbound code delivery
    notifier: Arc<N>,
    /// External user store, consulted for registration preconditions
    accounts: Arc<A>,
    /// Engine configuration
    config: VerificationConfig,
}

impl<S, N, A> VerificationService<S, N, A>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
{
    /// Create a new verification engine
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        accounts: Arc<A>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            accounts,
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Issue a new code for `(contact, purpose)` and deliver it.
    ///
    /// Any previous unverified code for the key is superseded, so exactly one
    /// active code exists per key after success. A failed delivery rolls the
    /// new record back before the error is surfaced, leaving no orphaned
    /// codes behind.
    pub async fn issue(&self, contact: &Contact, purpose: Purpose) -> DomainResult<IssueOutcome> {
        self.check_contact(contact)?;

        if purpose == Purpose::Registration
            && self.accounts.find_by_contact(contact).await?.is_some()
        {
            warn!(
                contact = %contact.masked(),
                event = "contact_taken",
                "Registration code requested for an already registered contact"
            );
            return Err(VerificationError::ContactTaken.into());
        }

        let code = CodeGenerator::generate(self.config.code_length)?;
        let expires_at = Utc::now() + Duration::minutes(self.config.window_minutes(purpose));

        let record = self
            .store
            .upsert_active(contact, purpose, &code, expires_at)
            .await?;

        info!(
            contact = %contact.masked(),
            purpose = %purpose,
            code_id = record.id,
            event = "code_issued",
            "Issued verification code"
        );

        if let Err(e) = self.notifier.send_code(contact, &code, purpose).await {
            warn!(
                contact = %contact.masked(),
                error = %e,
                event = "delivery_failed",
                "Failed to deliver verification code, rolling back the record"
            );
            self.store.delete(record.id).await?;
            return Err(VerificationError::DeliveryFailed.into());
        }

        Ok(IssueOutcome {
            message: format!("Verification code sent to your {}", contact.channel()),
            expires_at,
        })
    }

    /// Validate a submitted code and mark it verified.
    ///
    /// Checks run in a fixed order: the attempt counter moves on every call
    /// once a record is found and under the cap, the stored code is compared
    /// before expiry so a correct-but-stale submission reports `CodeExpired`
    /// rather than `InvalidCode`, and `mark_verified` runs only after every
    /// check passes.
    pub async fn validate(
        &self,
        contact: &Contact,
        purpose: Purpose,
        submitted: &str,
    ) -> DomainResult<VerificationCode> {
        let Some(record) = self.store.find_active(contact, purpose).await? else {
            return Err(VerificationError::CodeNotFound.into());
        };

        if record.attempt_count >= self.config.max_attempts {
            warn!(
                contact = %contact.masked(),
                purpose = %purpose,
                attempts = record.attempt_count,
                event = "attempts_exhausted",
                "Validation attempted on an exhausted code"
            );
            return Err(VerificationError::TooManyAttempts.into());
        }

        self.store.increment_attempt(contact, purpose).await?;

        if !constant_time_eq(record.code.as_bytes(), submitted.as_bytes()) {
            warn!(
                contact = %contact.masked(),
                purpose = %purpose,
                event = "code_mismatch",
                "Submitted verification code did not match"
            );
            return Err(VerificationError::InvalidCode.into());
        }

        if record.is_expired() {
            return Err(VerificationError::CodeExpired.into());
        }

        self.store.mark_verified(record.id).await?;

        info!(
            contact = %contact.masked(),
            purpose = %purpose,
            code_id = record.id,
            event = "code_verified",
            "Verification code accepted"
        );

        let mut verified = record;
        verified.verified = true;
        verified.attempt_count += 1;
        Ok(verified)
    }

    /// Mint a single-use reset token for a contact that holds a verified,
    /// unexpired code for `purpose`.
    pub async fn issue_reset_token(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> DomainResult<String> {
        let Some(record) = self.store.find_verified(contact, purpose).await? else {
            return Err(VerificationError::CodeNotFound.into());
        };

        let token = self.store.issue_reset_token(record.id).await?;

        info!(
            contact = %contact.masked(),
            code_id = record.id,
            event = "reset_token_issued",
            "Issued reset token"
        );

        Ok(token)
    }

    /// Look up a reset token without consuming it.
    ///
    /// The store lookup already filters used tokens; `token_used` is checked
    /// again on the returned record so a concurrently consumed token cannot
    /// slip through between lookup and use.
    pub async fn resolve_reset_token(
        &self,
        contact: &Contact,
        token: &str,
    ) -> DomainResult<VerificationCode> {
        let Some(record) = self.store.find_by_reset_token(contact, token).await? else {
            return Err(VerificationError::InvalidResetToken.into());
        };

        if record.token_used {
            return Err(VerificationError::ResetTokenUsed.into());
        }

        Ok(record)
    }

    /// Consume a reset token: mark it used and delete the record. Returns the
    /// contact the token was issued for so the caller can update credentials.
    pub async fn consume_reset_token(
        &self,
        contact: &Contact,
        token: &str,
    ) -> DomainResult<Contact> {
        let record = self.resolve_reset_token(contact, token).await?;
        self.store.mark_used_and_delete(record.id).await?;

        info!(
            contact = %contact.masked(),
            code_id = record.id,
            event = "reset_token_consumed",
            "Consumed reset token"
        );

        Ok(record.contact)
    }

    /// Remove expired and used records, optionally scoped to one contact.
    ///
    /// Housekeeping is caller-triggered only; there is no background sweeper.
    pub async fn cleanup(&self, contact: Option<&Contact>) -> DomainResult<u64> {
        let removed = self.store.delete_expired_and_used(contact).await?;
        if removed > 0 {
            info!(removed, event = "codes_swept", "Removed stale verification codes");
        }
        Ok(removed)
    }

    fn check_contact(&self, contact: &Contact) -> DomainResult<()> {
        let ok = match contact {
            Contact::Email(address) => is_valid_email(address),
            Contact::Phone(number) => is_valid_phone(number),
        };

        if ok {
            Ok(())
        } else {
            Err(DomainError::Validation {
                message: format!("Invalid {} contact", contact.channel()),
            })
        }
    }
}
