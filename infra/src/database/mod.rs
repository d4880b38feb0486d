//! MySQL persistence via SQLx.

pub mod mysql;

pub use mysql::{MySqlAccountDirectory, MySqlCodeStore};

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

use vf_shared::config::database::DatabaseConfig;

use crate::InfrastructureError;

/// Open a connection pool against the configured MySQL instance
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await?;
    Ok(pool)
}
