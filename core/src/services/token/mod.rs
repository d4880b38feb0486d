//! Access-token signing, verification, and shared revocation.

pub mod config;
pub mod service;

pub use config::TokenConfig;
pub use service::{Claims, RevocationStore, TokenService};
