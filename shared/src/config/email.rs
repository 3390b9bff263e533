//! Outbound email delivery configuration

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP mail API used to deliver one-time codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Mail API endpoint URL
    pub api_url: String,

    /// Mail API key
    pub api_key: String,

    /// Sender address placed in the `from` field of every message
    pub from_address: String,

    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.mail.invalid/v1/messages"),
            api_key: String::new(),
            from_address: String::from("no-reply@gatekeeper.dev"),
            request_timeout_secs: 15,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// Reads `MAIL_API_URL`, `MAIL_API_KEY`, `APP_EMAIL` and
    /// `MAIL_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("APP_EMAIL").unwrap_or(defaults.from_address),
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
