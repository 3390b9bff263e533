//! One-way password hashing behind a trait seam.

use crate::errors::{AuthError, DomainError};

/// Interface for one-way password hashing and verification
///
/// Hashing failure is a fatal infrastructure outcome
/// (`AuthError::HashingFailed`); verification failure of any kind, including
/// a malformed stored hash, is just a credential mismatch.
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password with a fresh salt
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, hash: &str, plaintext: &str) -> bool;
}

/// bcrypt implementation of the password hasher
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasherTrait for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(
                error = %e,
                event = "password_hashing_failed",
                "Failed to hash password"
            );
            DomainError::Auth(AuthError::HashingFailed)
        })
    }

    fn verify(&self, hash: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps these tests fast
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("Abcd1234").unwrap();

        assert_ne!(hash, "Abcd1234");
        assert!(hasher.verify(&hash, "Abcd1234"));
        assert!(!hasher.verify(&hash, "Abcd5678"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("Abcd1234").unwrap();
        let second = hasher.hash("Abcd1234").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        let hasher = hasher();
        assert!(!hasher.verify("not-a-bcrypt-hash", "Abcd1234"));
    }
}
