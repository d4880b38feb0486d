//! Outbound delivery of verification codes.
//!
//! Email goes over SMTP, phone over the Twilio API, and the channel notifier
//! dispatches on the contact variant. The mock notifier echoes codes to the
//! log for local development.

pub mod mock;

#[cfg(feature = "smtp-email")]
pub mod email;

#[cfg(feature = "twilio-sms")]
pub mod sms;

#[cfg(all(feature = "smtp-email", feature = "twilio-sms"))]
pub mod gateway;

pub use mock::MockNotifier;

#[cfg(feature = "smtp-email")]
pub use email::{SmtpConfig, SmtpMailer};

#[cfg(feature = "twilio-sms")]
pub use sms::{SmsConfig, TwilioSms};

#[cfg(all(feature = "smtp-email", feature = "twilio-sms"))]
pub use gateway::ChannelNotifier;
