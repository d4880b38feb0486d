//! Error types for verification, session, and token operations.
//!
//! These are returned as typed failures to the route-handler layer, which
//! owns the mapping to wire status codes and user-facing messages.

use thiserror::Error;

/// Verification-code lifecycle errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No active verification code for this contact")]
    CodeNotFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Too many verification attempts")]
    TooManyAttempts,

    #[error("Failed to deliver verification code")]
    DeliveryFailed,

    #[error("Contact already registered")]
    ContactTaken,

    #[error("Invalid reset token")]
    InvalidResetToken,

    #[error("Reset token already used")]
    ResetTokenUsed,
}

/// Registration session errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Registration session expired or not found")]
    SessionNotFound,

    #[error("Contact must be verified before completing registration")]
    VerificationRequired,
}

/// Access-token errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_errors_render_actionable_messages() {
        assert_eq!(
            VerificationError::TooManyAttempts.to_string(),
            "Too many verification attempts"
        );
        assert_eq!(
            VerificationError::CodeExpired.to_string(),
            "Verification code expired"
        );
    }

    #[test]
    fn session_errors_name_the_misuse() {
        assert!(SessionError::VerificationRequired
            .to_string()
            .contains("verified before completing"));
    }
}
