//! MySQL implementation of the OtpRepository trait.
//!
//! The single-outstanding-code invariant is enforced inside the database:
//! the insert is conditional on no outstanding row existing for the same
//! (user, purpose), so two concurrent issuance requests resolve to exactly
//! one stored code no matter how they interleave.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use gk_core::domain::entities::one_time_code::{CodePurpose, OneTimeCode};
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::OtpRepository;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a OneTimeCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<OneTimeCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;
        let purpose: String = row.try_get("purpose").map_err(|e| DomainError::Internal {
            message: format!("Failed to get purpose: {}", e),
        })?;

        Ok(OneTimeCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid code UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            purpose: purpose
                .parse::<CodePurpose>()
                .map_err(|e| DomainError::Internal {
                    message: format!("Invalid purpose value: {}", e),
                })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            is_expired: row
                .try_get("is_expired")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_expired: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OneTimeCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, purpose, code, is_expired, created_at, expires_at
            FROM one_time_codes
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query one-time code: {}", e),
            })?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_outstanding(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, purpose, code, is_expired, created_at, expires_at
            FROM one_time_codes
            WHERE user_id = ? AND purpose = ? AND is_expired = FALSE AND expires_at > ?
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(purpose.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query outstanding code: {}", e),
            })?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let query = r#"
            SELECT c.id, c.user_id, c.purpose, c.code, c.is_expired, c.created_at, c.expires_at
            FROM one_time_codes c
            INNER JOIN users u ON u.id = c.user_id
            WHERE u.email = ? AND c.code = ? AND c.purpose = ?
              AND c.is_expired = FALSE AND c.expires_at > ?
            ORDER BY c.created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(code)
            .bind(purpose.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query code by email: {}", e),
            })?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        // Conditional insert: the NOT EXISTS predicate and the insert run as
        // one statement, which is what closes the check-then-insert race.
        let query = r#"
            INSERT INTO one_time_codes
                (id, user_id, purpose, code, is_expired, created_at, expires_at)
            SELECT ?, ?, ?, ?, FALSE, ?, ?
            FROM DUAL
            WHERE NOT EXISTS (
                SELECT 1 FROM one_time_codes
                WHERE user_id = ? AND purpose = ? AND is_expired = FALSE AND expires_at > ?
            )
        "#;

        let result = sqlx::query(query)
            .bind(code.id.to_string())
            .bind(code.user_id.to_string())
            .bind(code.purpose.as_str())
            .bind(&code.code)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.user_id.to_string())
            .bind(code.purpose.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to insert one-time code");
                DomainError::Internal {
                    message: format!("Failed to insert one-time code: {}", e),
                }
            })?;

        if result.rows_affected() == 0 {
            debug!(
                user_id = %code.user_id,
                purpose = %code.purpose,
                "Conditional insert skipped: outstanding code exists"
            );
            return Err(DomainError::Auth(AuthError::CodeAlreadySent));
        }

        Ok(code)
    }

    async fn expire(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE one_time_codes
            SET is_expired = TRUE
            WHERE id = ? AND is_expired = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to expire one-time code: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Internal {
                message: "Expiring one-time code affected no rows".to_string(),
            });
        }

        Ok(())
    }

    async fn reinstate(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE one_time_codes
            SET is_expired = FALSE
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to reinstate one-time code: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OneTimeCode".to_string(),
            });
        }

        Ok(())
    }
}
