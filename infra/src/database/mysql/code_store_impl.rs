//! MySQL implementation of the CodeStore trait.
//!
//! Records live in the `verification_codes` table with the contact split
//! over nullable `email` / `phone` columns; `verify_type` records which one
//! is populated, and the row mapper folds the pair back into a [`Contact`].
//! MySQL cannot express a partial unique index over unverified rows, so the
//! one-active-record invariant is held by `upsert_active`'s delete-then-
//! insert running inside a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::{MySqlPool, Row};

use vf_core::domain::entities::verification_code::{Purpose, VerificationCode};
use vf_core::errors::DomainError;
use vf_core::repositories::CodeStore;
use vf_shared::types::Contact;

/// MySQL-backed code store
pub struct MySqlCodeStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCodeStore {
    /// Create a new store over an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    // 32 random bytes, hex-encoded; uniqueness is backed by the column's
    // unique index
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    fn contact_column(contact: &Contact) -> &'static str {
        match contact {
            Contact::Email(_) => "email",
            Contact::Phone(_) => "phone",
        }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let email: Option<String> = row.try_get("email").map_err(db_err)?;
        let phone: Option<String> = row.try_get("phone").map_err(db_err)?;
        let verify_type: String = row.try_get("verify_type").map_err(db_err)?;

        let contact = match verify_type.as_str() {
            "email" => email.map(Contact::Email),
            "phone" => phone.map(Contact::Phone),
            _ => None,
        }
        .ok_or_else(|| DomainError::Internal {
            message: format!("Row has verify_type '{}' but no matching contact", verify_type),
        })?;

        let purpose_raw: String = row.try_get("type").map_err(db_err)?;
        let purpose = Purpose::parse(&purpose_raw).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown verification purpose '{}'", purpose_raw),
        })?;

        Ok(VerificationCode {
            id: row.try_get("id").map_err(db_err)?,
            contact,
            code: row.try_get("code").map_err(db_err)?,
            purpose,
            verified: row.try_get("verified").map_err(db_err)?,
            attempt_count: row.try_get("attempt_count").map_err(db_err)?,
            reset_token: row.try_get("reset_token").map_err(db_err)?,
            token_used: row.try_get("token_used").map_err(db_err)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(db_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_err)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(db_err)?,
        })
    }
}

const RECORD_COLUMNS: &str = "id, email, phone, code, type, verified, reset_token, token_used, \
                              attempt_count, expires_at, verify_type, created_at, updated_at";

#[async_trait]
impl CodeStore for MySqlCodeStore {
    async fn upsert_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, DomainError> {
        let column = Self::contact_column(contact);
        let channel = contact.channel();
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let delete_sql = format!(
            "DELETE FROM verification_codes WHERE {} = ? AND type = ? AND verified = FALSE",
            column
        );
        sqlx::query(&delete_sql)
            .bind(contact.value())
            .bind(purpose.as_str())
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        let (email, phone) = match contact {
            Contact::Email(address) => (Some(address.as_str()), None),
            Contact::Phone(number) => (None, Some(number.as_str())),
        };

        let insert_sql = r#"
            INSERT INTO verification_codes (
                email, phone, code, type, verified, reset_token, token_used,
                attempt_count, expires_at, verify_type, created_at, updated_at
            ) VALUES (?, ?, ?, ?, FALSE, NULL, FALSE, 0, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(insert_sql)
            .bind(email)
            .bind(phone)
            .bind(code)
            .bind(purpose.as_str())
            .bind(expires_at)
            .bind(channel.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(VerificationCode::new(
            result.last_insert_id(),
            contact.clone(),
            purpose,
            code.to_string(),
            expires_at,
        ))
    }

    async fn find_active(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes \
             WHERE {} = ? AND type = ? AND verified = FALSE \
             ORDER BY id DESC LIMIT 1",
            RECORD_COLUMNS,
            Self::contact_column(contact)
        );

        let row = sqlx::query(&query)
            .bind(contact.value())
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_verified(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes \
             WHERE {} = ? AND type = ? AND verified = TRUE AND expires_at > ? \
             ORDER BY id DESC LIMIT 1",
            RECORD_COLUMNS,
            Self::contact_column(contact)
        );

        let row = sqlx::query(&query)
            .bind(contact.value())
            .bind(purpose.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn increment_attempt(
        &self,
        contact: &Contact,
        purpose: Purpose,
    ) -> Result<(), DomainError> {
        let query = format!(
            "UPDATE verification_codes \
             SET attempt_count = attempt_count + 1, updated_at = ? \
             WHERE {} = ? AND type = ? AND verified = FALSE",
            Self::contact_column(contact)
        );

        sqlx::query(&query)
            .bind(Utc::now())
            .bind(contact.value())
            .bind(purpose.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn mark_verified(&self, id: u64) -> Result<(), DomainError> {
        sqlx::query("UPDATE verification_codes SET verified = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn issue_reset_token(&self, id: u64) -> Result<String, DomainError> {
        let token = Self::generate_token();

        sqlx::query(
            "UPDATE verification_codes \
             SET reset_token = ?, token_used = FALSE, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&token)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(token)
    }

    async fn find_by_reset_token(
        &self,
        contact: &Contact,
        token: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes \
             WHERE {} = ? AND reset_token = ? AND verified = TRUE \
               AND token_used = FALSE AND expires_at > ? \
             LIMIT 1",
            RECORD_COLUMNS,
            Self::contact_column(contact)
        );

        let row = sqlx::query(&query)
            .bind(contact.value())
            .bind(token)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn mark_used_and_delete(&self, id: u64) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        // The flip lands before the delete inside the same transaction, so a
        // crash mid-sequence can never leave a reusable unused token.
        sqlx::query("UPDATE verification_codes SET token_used = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        sqlx::query("DELETE FROM verification_codes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verification_codes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn delete_expired_and_used(
        &self,
        contact: Option<&Contact>,
    ) -> Result<u64, DomainError> {
        let result = match contact {
            Some(contact) => {
                let query = format!(
                    "DELETE FROM verification_codes \
                     WHERE (expires_at < ? OR token_used = TRUE) AND {} = ?",
                    Self::contact_column(contact)
                );
                sqlx::query(&query)
                    .bind(Utc::now())
                    .bind(contact.value())
                    .execute(&self.pool)
                    .await
                    .map_err(store_err)?
            }
            None => {
                sqlx::query(
                    "DELETE FROM verification_codes WHERE expires_at < ? OR token_used = TRUE",
                )
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(store_err)?
            }
        };

        Ok(result.rows_affected())
    }
}

fn store_err(e: sqlx::Error) -> DomainError {
    DomainError::StoreUnavailable {
        message: e.to_string(),
    }
}

fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read verification_codes row: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_hex() {
        let a = MySqlCodeStore::generate_token();
        let b = MySqlCodeStore::generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn contact_column_follows_variant() {
        assert_eq!(
            MySqlCodeStore::contact_column(&Contact::email("a@b.com")),
            "email"
        );
        assert_eq!(
            MySqlCodeStore::contact_column(&Contact::phone("+61412345678")),
            "phone"
        );
    }
}
