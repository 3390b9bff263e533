//! Domain-specific error types for authentication and token operations
//!
//! Client-correctable failures carry their own variants so the boundary can
//! map them to precise responses; infrastructure failures are deliberately
//! collapsed to one generic outward message and distinguished only internally.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username and wrong password are intentionally
    /// indistinguishable to prevent username enumeration.
    #[error("Invalid credential!")]
    InvalidCredential,

    #[error("Invalid email")]
    EmailNotFound,

    #[error("You have already been verified!")]
    AlreadyVerified,

    #[error("A code has already been sent to your email, please check it!")]
    CodeAlreadySent,

    #[error("Invalid code!")]
    InvalidCode,

    #[error("Invalid code or email")]
    InvalidCodeOrEmail,

    #[error("You do not have a code or it has expired!")]
    CodeNotFoundOrExpired,

    #[error("Password hashing failed")]
    HashingFailed,

    #[error("Notification delivery failed")]
    NotificationFailed,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,
}
