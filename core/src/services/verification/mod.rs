//! Verification-code engine: issuing, validating, and retiring one-time
//! codes across delivery channels.

pub mod config;
pub mod generator;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use generator::CodeGenerator;
pub use service::VerificationService;
pub use traits::NotificationGateway;
pub use types::IssueOutcome;
