//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's repository and gateway traits:
//! MySQL persistence through SQLx, Redis-backed session and revocation
//! storage, and SMTP / SMS code delivery.
//!
//! ## Features
//!
//! - `mysql`: MySQL code store and account directory (default)
//! - `redis-cache`: Redis session and revocation stores (default)
//! - `twilio-sms`: Twilio SMS delivery (default)
//! - `smtp-email`: SMTP email delivery via lettre (default)

use thiserror::Error;

use vf_core::errors::DomainError;

/// Cache module - Redis client and stores
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Notification module - outbound code delivery
pub mod notify;

/// Configuration module for infrastructure services
pub mod config {
    //! Environment-driven configuration for infrastructure services.

    use vf_shared::config::{cache::CacheConfig, database::DatabaseConfig};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis cache configuration
        pub cache: CacheConfig,
    }

    impl InfrastructureConfig {
        /// Load configuration from the environment, reading a `.env` file if
        /// one is present
        pub fn from_env() -> Self {
            dotenvy::dotenv().ok();
            Self {
                database: DatabaseConfig::from_env(),
                cache: CacheConfig::from_env(),
            }
        }
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            Self {
                database: DatabaseConfig::default(),
                cache: CacheConfig::default(),
            }
        }
    }
}

/// Errors raised by infrastructure implementations before they are mapped
/// into domain errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}
