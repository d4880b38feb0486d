//! Integration traits consumed by the verification engine.

use async_trait::async_trait;

use vf_shared::types::Contact;

use crate::domain::entities::verification_code::Purpose;

/// Outbound delivery of one-time codes over email or SMS
///
/// A send is a blocking pass/fail call with no internal retry; a failed send
/// fails the whole issue operation. Retry policy, if any, belongs to the
/// transport behind the implementation.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver `code` to `contact` for the given purpose
    async fn send_code(&self, contact: &Contact, code: &str, purpose: Purpose)
        -> Result<(), String>;
}
