//! # Veriflow Core
//!
//! Core business logic and domain layer for the Veriflow backend. This crate
//! contains the verification-code engine, the registration session flow, the
//! credential reset orchestrator, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
