//! Channel-dispatching notification gateway.

use async_trait::async_trait;

use vf_core::domain::entities::verification_code::Purpose;
use vf_core::services::verification::NotificationGateway;
use vf_shared::types::Contact;

use super::email::SmtpMailer;
use super::sms::TwilioSms;

/// Routes each send to the transport matching the contact's channel
pub struct ChannelNotifier {
    mailer: SmtpMailer,
    sms: TwilioSms,
}

impl ChannelNotifier {
    /// Build a notifier from both transports
    pub fn new(mailer: SmtpMailer, sms: TwilioSms) -> Self {
        Self { mailer, sms }
    }
}

#[async_trait]
impl NotificationGateway for ChannelNotifier {
    async fn send_code(
        &self,
        contact: &Contact,
        code: &str,
        purpose: Purpose,
    ) -> Result<(), String> {
        match contact {
            Contact::Email(_) => self.mailer.send_code(contact, code, purpose).await,
            Contact::Phone(_) => self.sms.send_code(contact, code, purpose).await,
        }
    }
}
