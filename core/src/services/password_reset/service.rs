//! Password reset orchestration: request a code, verify it, spend the
//! resulting single-use token on a credential update.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use vf_shared::types::Contact;

use crate::domain::entities::verification_code::Purpose;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountDirectory, CodeStore};
use crate::services::verification::{
    CodeGenerator, IssueOutcome, NotificationGateway, VerificationService,
};

/// The response to a reset request, identical whether or not the contact maps
/// to a registered account
pub const RESET_REQUESTED_MESSAGE: &str =
    "If your contact is registered, you will receive a password reset code";

/// Result of verifying a reset code
#[derive(Debug, Clone)]
pub struct ResetVerification {
    /// Single-use token authorizing the subsequent password change
    pub reset_token: String,
    /// When the underlying verification record expires
    pub expires_at: DateTime<Utc>,
}

/// Orchestrates the three-step credential reset flow
pub struct PasswordResetService<S, N, A>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
{
    engine: VerificationService<S, N, A>,
    accounts: Arc<A>,
    bcrypt_cost: u32,
}

impl<S, N, A> PasswordResetService<S, N, A>
where
    S: CodeStore,
    N: NotificationGateway,
    A: AccountDirectory,
{
    /// Build the orchestrator over an engine and the shared account directory
    pub fn new(engine: VerificationService<S, N, A>, accounts: Arc<A>) -> Self {
        Self::with_cost(engine, accounts, bcrypt::DEFAULT_COST)
    }

    /// Build with an explicit bcrypt cost
    pub fn with_cost(
        engine: VerificationService<S, N, A>,
        accounts: Arc<A>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            engine,
            accounts,
            bcrypt_cost,
        }
    }

    /// Request a reset code for `contact`.
    ///
    /// The response is identical whether or not the contact maps to an
    /// account, and the unknown-contact branch performs the same code
    /// generation and expiry computation as the real one, so neither the
    /// message nor the latency reveals whether an account exists. Only the
    /// account-absent case is suppressed; every other failure propagates.
    pub async fn request_code(&self, contact: &Contact) -> DomainResult<IssueOutcome> {
        self.engine.cleanup(Some(contact)).await?;

        if self.accounts.find_by_contact(contact).await?.is_none() {
            let _ = CodeGenerator::generate(self.engine.config().code_length)?;
            let expires_at = Utc::now()
                + Duration::minutes(self.engine.config().window_minutes(Purpose::PasswordReset));

            info!(
                contact = %contact.masked(),
                event = "reset_requested_unknown",
                "Password reset requested for an unregistered contact"
            );

            return Ok(IssueOutcome {
                message: RESET_REQUESTED_MESSAGE.to_string(),
                expires_at,
            });
        }

        let outcome = self.engine.issue(contact, Purpose::PasswordReset).await?;

        Ok(IssueOutcome {
            message: RESET_REQUESTED_MESSAGE.to_string(),
            expires_at: outcome.expires_at,
        })
    }

    /// Validate a reset code and mint the follow-up token.
    ///
    /// The token rides back on the verification response; there is no second
    /// delivery round-trip.
    pub async fn verify_code(
        &self,
        contact: &Contact,
        code: &str,
    ) -> DomainResult<ResetVerification> {
        let record = self
            .engine
            .validate(contact, Purpose::PasswordReset, code)
            .await?;
        let reset_token = self
            .engine
            .issue_reset_token(contact, Purpose::PasswordReset)
            .await?;

        Ok(ResetVerification {
            reset_token,
            expires_at: record.expires_at,
        })
    }

    /// Set a new password for the account behind a valid reset token.
    ///
    /// The credential is updated before the token is consumed, so a failed
    /// update leaves the token usable for a retry.
    pub async fn reset_password(
        &self,
        contact: &Contact,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.engine.resolve_reset_token(contact, token).await?;

        let Some(account) = self.accounts.find_by_contact(contact).await? else {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        };

        let hash = bcrypt::hash(new_password, self.bcrypt_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            }
        })?;

        self.accounts.update_credential(account.id, &hash).await?;
        self.engine.consume_reset_token(contact, token).await?;

        info!(
            contact = %contact.masked(),
            event = "password_reset",
            "Password reset completed"
        );

        Ok(())
    }
}
