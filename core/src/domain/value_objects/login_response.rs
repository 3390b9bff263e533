//! Login response value object.

use serde::{Deserialize, Serialize};

/// Response returned after successful authentication
///
/// Carries the signed session token embedding the user's id, username and
/// role. The token is stateless; nothing about the login is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed session token
    pub token: String,

    /// Token scheme expected by the boundary (`Bearer`)
    pub token_type: String,
}

impl LoginResponse {
    /// Creates a new login response wrapping a signed token
    pub fn new(token: String) -> Self {
        Self {
            token,
            token_type: String::from("Bearer"),
        }
    }
}
