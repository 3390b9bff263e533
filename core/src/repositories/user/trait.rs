//! User repository trait defining the interface for user data persistence.
//!
//! This trait defines the contract for data access operations related to
//! users. Implementations handle the actual database operations while
//! maintaining the abstraction boundary between domain and infrastructure
//! layers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// The insert must affect exactly one row; implementations report
    /// anything else as an error rather than silently succeeding.
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted user
    /// * `Err(DomainError)` - Duplicate username/email or storage failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user's mutable fields (password hash, verified flag)
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - User missing (zero rows affected) or storage
    ///   failure
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
