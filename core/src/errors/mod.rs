//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use gk_shared::types::response::ErrorResponse;
use gk_shared::utils::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Accumulated field-level validation failures, always returned in full
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP-like status the boundary should map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation(_) | DomainError::Conflict { .. } => 400,
            DomainError::Auth(auth) => match auth {
                AuthError::InvalidCredential => 401,
                AuthError::HashingFailed | AuthError::NotificationFailed => 500,
                _ => 400,
            },
            DomainError::Token(token) => match token {
                TokenError::TokenGenerationFailed => 500,
                _ => 401,
            },
            // Storage inconsistencies are never surfaced as such
            DomainError::NotFound { .. } | DomainError::Internal { .. } => 500,
        }
    }

    /// Stable machine-readable code, for logs and client branching
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION_FAILED",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(auth) => match auth {
                AuthError::InvalidCredential => "INVALID_CREDENTIAL",
                AuthError::EmailNotFound => "INVALID_EMAIL",
                AuthError::AlreadyVerified => "ALREADY_VERIFIED",
                AuthError::CodeAlreadySent => "CODE_ALREADY_SENT",
                AuthError::InvalidCode => "INVALID_CODE",
                AuthError::InvalidCodeOrEmail => "INVALID_CODE_OR_EMAIL",
                AuthError::CodeNotFoundOrExpired => "CODE_NOT_FOUND_OR_EXPIRED",
                AuthError::HashingFailed => "HASHING_FAILED",
                AuthError::NotificationFailed => "NOTIFICATION_FAILED",
            },
            DomainError::Token(token) => match token {
                TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
                TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
                TokenError::InvalidSignature => "INVALID_SIGNATURE",
                TokenError::InvalidClaims => "INVALID_CLAIMS",
            },
        }
    }
}

/// Convert a domain error into the wire error shape
///
/// Server-side failures (status 500) are collapsed to a single generic code
/// and message so internal detail never leaks; the specific cause stays in
/// the `DomainError` itself for logging.
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        if err.status_code() >= 500 {
            return ErrorResponse::new("SERVER_ERROR", "Unexpected error");
        }
        match err {
            DomainError::Validation(errors) => {
                ErrorResponse::new(err.error_code(), "Validation failed")
                    .with_errors(errors.messages())
            }
            _ => ErrorResponse::new(err.error_code(), err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failure_is_unauthorized() {
        let err = DomainError::Auth(AuthError::InvalidCredential);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_CREDENTIAL");
    }

    #[test]
    fn test_infrastructure_errors_collapse_to_generic_response() {
        let hashing = DomainError::Auth(AuthError::HashingFailed);
        let notify = DomainError::Auth(AuthError::NotificationFailed);
        let internal = DomainError::Internal {
            message: "insert affected 0 rows".to_string(),
        };

        for err in [&hashing, &notify, &internal] {
            assert_eq!(err.status_code(), 500);
            let response = ErrorResponse::from(err);
            assert_eq!(response.error, "SERVER_ERROR");
            assert_eq!(response.message, "Unexpected error");
        }

        // Internal codes remain distinguishable for observability
        assert_ne!(hashing.error_code(), notify.error_code());
    }

    #[test]
    fn test_validation_errors_returned_in_full() {
        let mut errors = gk_shared::utils::validation::ValidationErrors::new();
        errors.add_error("username", "Username has already been used", "DUPLICATE");
        errors.add_error("email", "Email has already been used", "DUPLICATE");

        let err = DomainError::Validation(errors);
        assert_eq!(err.status_code(), 400);

        let response = ErrorResponse::from(&err);
        assert_eq!(response.errors.unwrap().len(), 2);
    }

    #[test]
    fn test_code_flow_errors_are_client_errors() {
        assert_eq!(DomainError::Auth(AuthError::CodeAlreadySent).status_code(), 400);
        assert_eq!(DomainError::Auth(AuthError::InvalidCode).status_code(), 400);
        assert_eq!(
            DomainError::Auth(AuthError::CodeNotFoundOrExpired).status_code(),
            400
        );
    }
}
