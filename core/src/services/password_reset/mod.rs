//! Credential reset flow built on the verification engine.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::{PasswordResetService, ResetVerification, RESET_REQUESTED_MESSAGE};
