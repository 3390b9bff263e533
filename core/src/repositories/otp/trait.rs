//! One-time-code repository trait.
//!
//! The OTP store owns all code mutation; services never write code rows
//! except through this interface. "Outstanding" in every method below means
//! not consumed (`is_expired == false`) and not past the expiry timestamp.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::one_time_code::{CodePurpose, OneTimeCode};
use crate::errors::DomainError;

/// Repository trait for OneTimeCode persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Find a code row by its identifier, regardless of state
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OneTimeCode>, DomainError>;

    /// Find the outstanding code for a (user, purpose) pair, if any
    async fn find_outstanding(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError>;

    /// Find an outstanding code matching the owner's email and the exact
    /// code value for the given purpose
    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError>;

    /// Insert a new code, atomically enforcing the single-outstanding-code
    /// invariant
    ///
    /// The existence check and the insert MUST happen as one atomic step
    /// (uniqueness predicate in SQL, one critical section in memory) so that
    /// two concurrent issuance requests cannot both succeed.
    ///
    /// # Returns
    /// * `Ok(OneTimeCode)` - The persisted code
    /// * `Err(DomainError::Auth(AuthError::CodeAlreadySent))` - An
    ///   outstanding code already exists for this (user, purpose)
    /// * `Err(DomainError)` - Storage failure
    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError>;

    /// Mark a code as consumed
    ///
    /// Consumption happens exactly once; if the row is missing or already
    /// consumed (zero rows affected) this is an error.
    async fn expire(&self, id: Uuid) -> Result<(), DomainError>;

    /// Clear the consumed flag on a code
    ///
    /// Compensation primitive: used when the write that was supposed to
    /// follow consumption failed, so the code must become usable again.
    async fn reinstate(&self, id: Uuid) -> Result<(), DomainError>;
}
