//! Trait interfaces for external services used by code issuance.

use async_trait::async_trait;

/// Interface for delivering a one-time code out of band
///
/// Delivery is fire-and-forget from the caller's perspective, but failure is
/// observable: implementations return the provider's message id on success
/// or a provider error string on failure. One attempt per call; retrying is
/// not this layer's concern.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a one-time code to an email address
    async fn send_code(&self, to: &str, subject: &str, code: &str) -> Result<String, String>;
}
