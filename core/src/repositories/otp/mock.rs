//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::one_time_code::{CodePurpose, OneTimeCode};
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

use super::trait_::OtpRepository;

/// In-memory one-time-code repository for testing
///
/// Holds a reference to the mock user store so email lookups can resolve the
/// owning user, the same join the SQL implementation performs. `create` runs
/// its existence check and insert under one write lock, which is what makes
/// the concurrency tests against this mock meaningful.
pub struct MockOtpRepository {
    codes: Arc<RwLock<HashMap<Uuid, OneTimeCode>>>,
    users: Arc<MockUserRepository>,
}

impl MockOtpRepository {
    /// Create a new mock repository backed by the given user store
    pub fn new(users: Arc<MockUserRepository>) -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            users,
        }
    }

    /// Number of outstanding codes for a (user, purpose) pair
    pub async fn outstanding_count(&self, user_id: Uuid, purpose: CodePurpose) -> usize {
        let codes = self.codes.read().await;
        codes
            .values()
            .filter(|c| c.user_id == user_id && c.purpose == purpose && c.is_outstanding())
            .count()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OneTimeCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes.get(&id).cloned())
    }

    async fn find_outstanding(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .find(|c| c.user_id == user_id && c.purpose == purpose && c.is_outstanding())
            .cloned())
    }

    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .find(|c| {
                c.user_id == user.id && c.purpose == purpose && c.code == code && c.is_outstanding()
            })
            .cloned())
    }

    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        // Single critical section over check + insert
        let mut codes = self.codes.write().await;

        if codes
            .values()
            .any(|c| c.user_id == code.user_id && c.purpose == code.purpose && c.is_outstanding())
        {
            return Err(DomainError::Auth(AuthError::CodeAlreadySent));
        }

        codes.insert(code.id, code.clone());
        Ok(code)
    }

    async fn expire(&self, id: Uuid) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;

        match codes.get_mut(&id) {
            Some(code) if !code.is_expired => {
                code.expire();
                Ok(())
            }
            _ => Err(DomainError::Internal {
                message: "Expiring one-time code affected no rows".to_string(),
            }),
        }
    }

    async fn reinstate(&self, id: Uuid) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;

        match codes.get_mut(&id) {
            Some(code) => {
                code.is_expired = false;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "OneTimeCode".to_string(),
            }),
        }
    }
}
