//! HTTP mail-API implementation of the core's MailerTrait.
//!
//! Posts one message per call to a REST mail gateway. Exactly one attempt is
//! made; failures are reported to the caller, never retried here.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use gk_core::services::verification::MailerTrait;
use gk_shared::config::EmailConfig;
use gk_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Successful submission response from the mail API
#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
}

/// Mailer delivering codes through an HTTP mail API
pub struct HttpApiMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpApiMailer {
    /// Create a new mailer from configuration
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_API_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %config.from_address,
            "Mail API client initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(EmailConfig::from_env())
    }
}

#[async_trait]
impl MailerTrait for HttpApiMailer {
    async fn send_code(&self, to: &str, subject: &str, code: &str) -> Result<String, String> {
        let body = serde_json::json!({
            "from": self.config.from_address,
            "to": to,
            "subject": subject,
            "text": code,
            "html": format!("Please use the code below<br><b>{}</b>", code),
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    to = %mask_email(to),
                    error = %e,
                    "Mail API request failed"
                );
                format!("Mail API request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                to = %mask_email(to),
                status = %status,
                "Mail API rejected the message"
            );
            return Err(format!("Mail API returned status {}", status));
        }

        let message_id = response
            .json::<MessageResponse>()
            .await
            .map(|r| r.id)
            .unwrap_or_else(|_| "unknown".to_string());

        info!(
            to = %mask_email(to),
            message_id = %message_id,
            "Delivered code email"
        );
        Ok(message_id)
    }
}
