//! Domain entities for the verification core.

pub mod account;
pub mod registration_session;
pub mod verification_code;

pub use account::Account;
pub use registration_session::{RegistrationSession, SessionStep, SESSION_TTL_SECONDS};
pub use verification_code::{Purpose, VerificationCode, CODE_LENGTH, MAX_ATTEMPTS};
