//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Authentication, token signing and password hashing configuration
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound mail delivery configuration
//!
//! All values come from the process environment; components receive these
//! structs explicitly through their constructors instead of reading globals.

pub mod auth;
pub mod database;
pub mod email;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Authentication configuration
    pub auth: AuthConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Outbound email configuration
    pub email: EmailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            database: DatabaseConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            auth: AuthConfig::from_env(),
            database: DatabaseConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}
