//! Token service configuration.

use gk_shared::config::AuthConfig;
use jsonwebtoken::Algorithm;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret key for HMAC signing
    pub jwt_secret: String,

    /// Signing algorithm
    pub algorithm: Algorithm,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            algorithm: Algorithm::HS256,
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with the given secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.clone())
    }
}
