//! Configuration for the verification engine.

use crate::domain::entities::verification_code::{Purpose, CODE_LENGTH, MAX_ATTEMPTS};

/// Tunables for code issuance and validation
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Validation attempts allowed per code
    pub max_attempts: i32,
    /// Validity window for registration codes, in minutes
    pub registration_window_minutes: i64,
    /// Validity window for password reset codes, in minutes
    pub password_reset_window_minutes: i64,
    /// Validity window for contact verification and contact changes, in minutes
    pub contact_window_minutes: i64,
}

impl VerificationConfig {
    /// Validity window for codes issued for `purpose`, in minutes
    pub fn window_minutes(&self, purpose: Purpose) -> i64 {
        match purpose {
            Purpose::Registration => self.registration_window_minutes,
            Purpose::PasswordReset => self.password_reset_window_minutes,
            Purpose::EmailVerification | Purpose::ChangeEmail | Purpose::ChangePhone => {
                self.contact_window_minutes
            }
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            max_attempts: MAX_ATTEMPTS,
            registration_window_minutes: 30,
            password_reset_window_minutes: 5,
            contact_window_minutes: 30,
        }
    }
}
