//! Verification code entity shared by registration, contact verification,
//! and credential reset flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vf_shared::types::{Channel, Contact};

/// Length of a generated verification code
pub const CODE_LENGTH: usize = 6;

/// Maximum number of validation attempts before a code becomes inert
pub const MAX_ATTEMPTS: i32 = 5;

/// Business reason a verification code was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Registration,
    PasswordReset,
    EmailVerification,
    ChangeEmail,
    ChangePhone,
}

impl Purpose {
    /// Column value used by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Registration => "registration",
            Purpose::PasswordReset => "password_reset",
            Purpose::EmailVerification => "email_verification",
            Purpose::ChangeEmail => "change_email",
            Purpose::ChangePhone => "change_phone",
        }
    }

    /// Parse a column value back into a purpose
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registration" => Some(Purpose::Registration),
            "password_reset" => Some(Purpose::PasswordReset),
            "email_verification" => Some(Purpose::EmailVerification),
            "change_email" => Some(Purpose::ChangeEmail),
            "change_phone" => Some(Purpose::ChangePhone),
            _ => None,
        }
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted verification code record
///
/// The record moves through `issued -> (verified | expired | attempts
/// exhausted)`; verified records either get a single-use reset token minted
/// onto them or are swept by cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Store-assigned identifier
    pub id: u64,

    /// Where the code was delivered
    pub contact: Contact,

    /// The one-time code value
    pub code: String,

    /// Why the code was issued
    pub purpose: Purpose,

    /// Set exactly once, on successful validation
    pub verified: bool,

    /// Validation attempts made so far, success or failure
    pub attempt_count: i32,

    /// Single-use token minted after verification for follow-up actions
    pub reset_token: Option<String>,

    /// Flipped immediately before the reset token is consumed
    pub token_used: bool,

    /// Instant at which the code stops being usable
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation
    pub updated_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Create a fresh, unverified record
    pub fn new(
        id: u64,
        contact: Contact,
        purpose: Purpose,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            contact,
            code,
            purpose,
            verified: false,
            attempt_count: 0,
            reset_token: None,
            token_used: false,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Delivery channel, derived from the contact variant
    pub fn channel(&self) -> Channel {
        self.contact.channel()
    }

    /// Whether the validity window has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the code can still be presented for validation: unverified,
    /// unexpired, and under the attempt cap
    pub fn is_active(&self) -> bool {
        !self.verified && !self.is_expired() && self.attempt_count < MAX_ATTEMPTS
    }

    /// Validation attempts left before the code becomes inert
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempt_count).max(0)
    }
}
