//! Request and outcome types for the authentication flows.

use serde::{Deserialize, Serialize};

/// Registration input
///
/// `confirm_password` exists only for validation; it is stripped before
/// anything is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

/// Password-reset submission input (phase B of the forgot-password flow)
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

/// Result of an account-verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Phase A ran: a fresh code was issued and mailed
    CodeSent,
    /// Phase B ran: the code matched and the account is now verified
    Verified,
}
