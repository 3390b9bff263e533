//! OTP service configuration.

use gk_shared::config::AuthConfig;

/// Configuration for one-time-code issuance
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes until an issued code expires
    pub code_expiration_minutes: i64,

    /// Upper bound in seconds for a single mail delivery attempt
    pub notify_timeout_secs: u64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 15,
            notify_timeout_secs: 10,
        }
    }
}

impl From<&AuthConfig> for OtpServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            notify_timeout_secs: config.notify_timeout_secs,
        }
    }
}
