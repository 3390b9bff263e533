//! Authentication and credential configuration

use serde::{Deserialize, Serialize};

/// Authentication configuration covering token signing, password hashing
/// and one-time-code policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Minutes until an issued one-time code expires
    pub code_expiration_minutes: i64,

    /// Upper bound in seconds for a single mail delivery attempt
    pub notify_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            bcrypt_cost: 12,
            code_expiration_minutes: 15,
            notify_timeout_secs: 10,
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with the given signing secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Reads `APP_SECRET`, `BCRYPT_COST`, `CODE_EXPIRATION_MINUTES` and
    /// `NOTIFY_TIMEOUT_SECS`, falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("APP_SECRET").unwrap_or(defaults.jwt_secret),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
            code_expiration_minutes: std::env::var("CODE_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_expiration_minutes),
            notify_timeout_secs: std::env::var("NOTIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notify_timeout_secs),
        }
    }

    /// Set the code expiration window in minutes
    pub fn with_code_expiration_minutes(mut self, minutes: i64) -> Self {
        self.code_expiration_minutes = minutes;
        self
    }

    /// Set the bcrypt cost factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
