//! One-time code entity for password reset and account verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a one-time code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for one-time codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Discriminator for which flow a one-time code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    /// Code authorizes a password reset
    PasswordReset,
    /// Code authorizes marking the account as verified
    AccountVerify,
}

impl CodePurpose {
    /// String form used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::PasswordReset => "password_reset",
            CodePurpose::AccountVerify => "account_verify",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password_reset" => Ok(CodePurpose::PasswordReset),
            "account_verify" => Ok(CodePurpose::AccountVerify),
            _ => Err(format!("Invalid code purpose: {}", s)),
        }
    }
}

/// One-time code bound to a user and a purpose
///
/// A code is *outstanding* while it has neither been consumed nor aged past
/// its expiry timestamp. At most one outstanding code may exist per
/// (user, purpose) pair; issuance is rejected, not replaced, while one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Unique identifier for the code row
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Flow this code belongs to
    pub purpose: CodePurpose,

    /// The 6-digit code value
    pub code: String,

    /// Whether the code has been consumed
    pub is_expired: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Creates a new code for a user and purpose with the given lifetime
    pub fn new(user_id: Uuid, purpose: CodePurpose, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            purpose,
            code: Self::generate_code(),
            is_expired: false,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code
    ///
    /// Uses the OS CSPRNG so positions are uniform and independent; leading
    /// zeros are allowed. This is the single generation routine for every
    /// flow that issues codes.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias over 10^6 is negligible for a short-lived code.
        format!("{:06}", num % 1_000_000)
    }

    /// Checks whether the code has aged past its expiry timestamp
    pub fn is_past_expiry(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks whether the code can still be consumed
    pub fn is_outstanding(&self) -> bool {
        !self.is_expired && !self.is_past_expiry()
    }

    /// Compares a submitted value against this code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Marks the code as consumed
    pub fn expire(&mut self) {
        self.is_expired = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code_is_outstanding() {
        let code = OneTimeCode::new(
            Uuid::new_v4(),
            CodePurpose::PasswordReset,
            DEFAULT_EXPIRATION_MINUTES,
        );

        assert_eq!(code.code.len(), CODE_LENGTH);
        assert!(!code.is_expired);
        assert!(!code.is_past_expiry());
        assert!(code.is_outstanding());
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = OneTimeCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_varies() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| OneTimeCode::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_matches_constant_time() {
        let mut code = OneTimeCode::new(Uuid::new_v4(), CodePurpose::AccountVerify, 5);
        code.code = "042137".to_string();

        assert!(code.matches("042137"));
        assert!(!code.matches("042138"));
        assert!(!code.matches("04213"));
        assert!(!code.matches("0421370"));
    }

    #[test]
    fn test_consumed_code_is_not_outstanding() {
        let mut code = OneTimeCode::new(Uuid::new_v4(), CodePurpose::PasswordReset, 5);

        code.expire();
        assert!(code.is_expired);
        assert!(!code.is_outstanding());
    }

    #[test]
    fn test_wall_clock_expiry() {
        let mut code = OneTimeCode::new(Uuid::new_v4(), CodePurpose::PasswordReset, 0);
        code.expires_at = Utc::now() - Duration::seconds(1);

        assert!(code.is_past_expiry());
        assert!(!code.is_outstanding());
        assert!(!code.is_expired, "wall-clock expiry is not consumption");
    }

    #[test]
    fn test_purpose_round_trip() {
        assert_eq!(
            "password_reset".parse::<CodePurpose>().unwrap(),
            CodePurpose::PasswordReset
        );
        assert_eq!(
            "account_verify".parse::<CodePurpose>().unwrap(),
            CodePurpose::AccountVerify
        );
        assert!("otp".parse::<CodePurpose>().is_err());
    }
}
