//! Result types returned by the verification engine.

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// Caller-facing confirmation message
    pub message: String,
    /// When the issued code stops being valid
    pub expires_at: DateTime<Utc>,
}
