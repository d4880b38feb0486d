//! MySQL implementation of the AccountDirectory trait.
//!
//! Reads the external `users` table and, in the reset flow, replaces an
//! account's credential hash. Account creation stays with the user service
//! that owns the table.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};

use vf_core::domain::entities::account::Account;
use vf_core::errors::DomainError;
use vf_core::repositories::AccountDirectory;
use vf_shared::types::Contact;

/// MySQL-backed account directory
pub struct MySqlAccountDirectory {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountDirectory {
    /// Create a new directory over an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for MySqlAccountDirectory {
    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Account>, DomainError> {
        let (query, value) = match contact {
            Contact::Email(address) => (
                "SELECT user_id, fullname FROM users WHERE email = ? LIMIT 1",
                address.as_str(),
            ),
            Contact::Phone(number) => (
                "SELECT user_id, fullname FROM users WHERE phone_number = ? LIMIT 1",
                number.as_str(),
            ),
        };

        let row = sqlx::query(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.map(|row| {
            Ok(Account {
                id: row.try_get("user_id").map_err(|e| DomainError::Internal {
                    message: format!("Failed to read users row: {}", e),
                })?,
                contact: contact.clone(),
                full_name: row.try_get("fullname").map_err(|e| DomainError::Internal {
                    message: format!("Failed to read users row: {}", e),
                })?,
            })
        })
        .transpose()
    }

    async fn update_credential(&self, account_id: u64, new_hash: &str) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE user_id = ?")
                .bind(new_hash)
                .bind(Utc::now())
                .bind(account_id)
                .execute(&self.pool)
                .await
                .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        Ok(())
    }
}

fn store_err(e: sqlx::Error) -> DomainError {
    DomainError::StoreUnavailable {
        message: e.to_string(),
    }
}
