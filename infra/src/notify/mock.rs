//! Console-echo notifier for local development.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

use vf_core::domain::entities::verification_code::Purpose;
use vf_core::services::verification::NotificationGateway;
use vf_shared::types::Contact;

/// Logs every code instead of delivering it, and keeps a record so local
/// tooling can read codes back
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    /// Create a new mock notifier
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Codes sent to a contact, oldest first
    pub fn codes_for(&self, contact: &Contact) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == contact.value())
            .map(|(_, code)| code.clone())
            .collect()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for MockNotifier {
    async fn send_code(
        &self,
        contact: &Contact,
        code: &str,
        purpose: Purpose,
    ) -> Result<(), String> {
        info!(
            contact = %contact.masked(),
            purpose = %purpose,
            code = %code,
            "[mock] would deliver verification code"
        );
        self.sent
            .lock()
            .unwrap()
            .push((contact.value().to_string(), code.to_string()));
        Ok(())
    }
}
