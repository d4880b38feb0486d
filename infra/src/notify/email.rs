//! SMTP delivery of verification codes via lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use vf_core::domain::entities::verification_code::Purpose;
use vf_core::services::verification::NotificationGateway;
use vf_shared::types::Contact;

use crate::InfrastructureError;

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP username
    pub username: String,
    /// SMTP password
    pub password: String,
    /// Sender address
    pub from_address: String,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Ok(Self {
            host: std::env::var("SMTP_HOST")
                .map_err(|_| InfrastructureError::Config("SMTP_HOST not set".to_string()))?,
            username: std::env::var("SMTP_USERNAME")
                .map_err(|_| InfrastructureError::Config("SMTP_USERNAME not set".to_string()))?,
            password: std::env::var("SMTP_PASSWORD")
                .map_err(|_| InfrastructureError::Config("SMTP_PASSWORD not set".to_string()))?,
            from_address: std::env::var("SMTP_FROM")
                .map_err(|_| InfrastructureError::Config("SMTP_FROM not set".to_string()))?,
        })
    }
}

/// Email notifier delivering codes over SMTP
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from SMTP settings
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP host: {}", e)))?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self { transport, from })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env()?)
    }

    fn subject(purpose: Purpose) -> &'static str {
        match purpose {
            Purpose::Registration => "Confirm your registration",
            Purpose::PasswordReset => "Your password reset code",
            Purpose::EmailVerification => "Verify your email address",
            Purpose::ChangeEmail => "Confirm your new email address",
            Purpose::ChangePhone => "Confirm your new phone number",
        }
    }

    fn body(code: &str) -> String {
        format!(
            "Your verification code is {}.\n\n\
             The code expires shortly. If you did not request it, you can \
             safely ignore this message.",
            code
        )
    }

    /// Send a code to an email address
    pub async fn send(
        &self,
        address: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<(), InfrastructureError> {
        let to = address
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Delivery(format!("Invalid recipient: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(Self::subject(purpose))
            .header(ContentType::TEXT_PLAIN)
            .body(Self::body(code))
            .map_err(|e| InfrastructureError::Delivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Delivery(e.to_string()))?;

        info!(
            contact = %Contact::email(address).masked(),
            purpose = %purpose,
            "Sent verification email"
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationGateway for SmtpMailer {
    async fn send_code(
        &self,
        contact: &Contact,
        code: &str,
        purpose: Purpose,
    ) -> Result<(), String> {
        match contact {
            Contact::Email(address) => self
                .send(address, code, purpose)
                .await
                .map_err(|e| e.to_string()),
            Contact::Phone(_) => Err("SMTP mailer cannot deliver to a phone contact".to_string()),
        }
    }
}
