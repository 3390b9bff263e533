//! User entity representing a registered account in the GateKeeper system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse authorization tier assigned to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access
    Admin,
    /// Back-office staff
    Staff,
    /// Regular member; assigned at registration
    Member,
}

impl UserRole {
    /// String form used in token claims and database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Member => "member",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "staff" => Ok(UserRole::Staff),
            "member" => Ok(UserRole::Member),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across the system
    pub email: String,

    /// Login name, unique across the system
    pub username: String,

    /// Opaque password hash; never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Authorization tier
    pub role: UserRole,

    /// Whether the account's email address has been verified
    pub is_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with the default `Member` role
    pub fn new(
        name: String,
        email: String,
        username: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            username,
            password_hash,
            role: UserRole::Member,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Checks if the user holds administrative privileges
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Al".to_string(),
            "al@x.com".to_string(),
            "al".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();

        assert_eq!(user.role, UserRole::Member);
        assert!(!user.is_admin());
        assert!(!user.is_verified);
        assert_eq!(user.username, "al");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_verify_sets_flag() {
        let mut user = sample_user();

        assert!(!user.is_verified);
        user.verify();
        assert!(user.is_verified);
    }

    #[test]
    fn test_set_password_replaces_hash() {
        let mut user = sample_user();
        let original = user.password_hash.clone();

        user.set_password("$2b$12$other".to_string());
        assert_ne!(user.password_hash, original);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("member".parse::<UserRole>().unwrap(), UserRole::Member);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("superuser".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Staff.as_str(), "staff");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "member");
    }
}
