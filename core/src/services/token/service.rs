//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Claims embedded in a session token
///
/// Deliberately carries no expiry claim; token lifetime policy belongs to
/// the signing boundary, not this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,

    /// Login name
    pub username: String,

    /// Authorization tier
    pub role: UserRole,

    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
}

/// Service minting and verifying stateless session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        // Tokens carry no exp claim
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Signs a session token embedding the user's id, username and role
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError)` - Token generation failed (server error)
    pub fn sign_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                event = "token_generation_failed",
                "Failed to sign session token"
            );
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if the signature is valid
    /// * `Err(DomainError)` - Token is malformed or the signature fails
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let token_error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                    _ => TokenError::InvalidClaims,
                };
                DomainError::Token(token_error)
            })
    }
}
