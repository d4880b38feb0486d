//! Twilio SMS delivery of verification codes.

use async_trait::async_trait;
use tracing::info;
use twilio::{Client, OutboundMessage};

use vf_core::domain::entities::verification_code::Purpose;
use vf_core::services::verification::NotificationGateway;
use vf_shared::types::Contact;

use crate::InfrastructureError;

/// Twilio API settings
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
}

impl SmsConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let from_number = std::env::var("TWILIO_FROM_NUMBER").map_err(|_| {
            InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string())
        })?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format".to_string(),
            ));
        }

        Ok(Self {
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").map_err(|_| {
                InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string())
            })?,
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").map_err(|_| {
                InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string())
            })?,
            from_number,
        })
    }
}

/// SMS notifier delivering codes through the Twilio API
pub struct TwilioSms {
    client: Client,
    from_number: String,
}

impl TwilioSms {
    /// Create a notifier from Twilio settings
    pub fn new(config: SmsConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);
        Self {
            client,
            from_number: config.from_number,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Ok(Self::new(SmsConfig::from_env()?))
    }

    /// Send a code to a phone number
    pub async fn send(&self, number: &str, code: &str) -> Result<(), InfrastructureError> {
        let body = format!("Your Veriflow verification code is {}", code);
        let message = OutboundMessage::new(&self.from_number, number, &body);

        let response = self
            .client
            .send_message(message)
            .await
            .map_err(|e| InfrastructureError::Delivery(format!("Twilio send failed: {}", e)))?;

        info!(
            contact = %Contact::phone(number).masked(),
            sid = %response.sid,
            "Sent verification SMS"
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationGateway for TwilioSms {
    async fn send_code(
        &self,
        contact: &Contact,
        code: &str,
        _purpose: Purpose,
    ) -> Result<(), String> {
        match contact {
            Contact::Phone(number) => self.send(number, code).await.map_err(|e| e.to_string()),
            Contact::Email(_) => Err("SMS notifier cannot deliver to an email contact".to_string()),
        }
    }
}
