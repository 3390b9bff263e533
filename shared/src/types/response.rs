//! API response types and wrappers
//!
//! These are the wire shapes the transport boundary serializes. The core
//! never constructs HTTP responses itself; it returns domain results that the
//! boundary maps onto these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Field-level error messages (present on validation failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with a message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a successful response carrying a payload
    pub fn success_with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a failed response with a single message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a failed response carrying a list of field errors
    pub fn failure_with_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            errors: Some(errors),
            timestamp: Utc::now(),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Standardized error response structure for domain errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Field-level error messages when validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Timestamp of when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach field-level error messages
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_serialization() {
        let response: ApiResponse<String> =
            ApiResponse::success_with_data("Login success!", "token".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login success!");
        assert_eq!(json["data"], "token");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_failure_with_errors_omits_message() {
        let response: ApiResponse<()> = ApiResponse::failure_with_errors(vec![
            "Username has already been used".to_string(),
            "Email has already been used".to_string(),
        ]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("message").is_none());
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("SERVER_ERROR", "Unexpected error");
        assert_eq!(response.error, "SERVER_ERROR");
        assert!(response.errors.is_none());
    }
}
