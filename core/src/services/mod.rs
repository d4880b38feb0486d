//! Business services for the verification core.

pub mod password_reset;
pub mod registration;
pub mod token;
pub mod verification;

pub use password_reset::{PasswordResetService, ResetVerification, RESET_REQUESTED_MESSAGE};
pub use registration::{RegistrationFlow, RegistrationSessionManager, SessionStore};
pub use token::{RevocationStore, TokenConfig, TokenService};
pub use verification::{
    CodeGenerator, IssueOutcome, NotificationGateway, VerificationConfig, VerificationService,
};
