//! One-time-code lifecycle service.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::one_time_code::{CodePurpose, OneTimeCode};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::config::OtpServiceConfig;
use super::traits::MailerTrait;

/// Service owning issuance and consumption of one-time codes
///
/// Every flow that needs a code goes through this service, so generation,
/// the single-outstanding-code guard and delivery behave identically for
/// password reset and account verification.
pub struct OtpService<O: OtpRepository, M: MailerTrait> {
    /// Code persistence
    otp_repository: Arc<O>,
    /// Out-of-band delivery channel
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O: OtpRepository, M: MailerTrait> OtpService<O, M> {
    /// Create a new OTP service
    pub fn new(otp_repository: Arc<O>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            otp_repository,
            mailer,
            config,
        }
    }

    /// Issue a new code for a user and purpose and deliver it by mail
    ///
    /// This method:
    /// 1. Rejects the request if an outstanding code already exists
    /// 2. Generates a fresh 6-digit code with the configured lifetime
    /// 3. Persists it through the repository's atomic check-and-insert
    /// 4. Re-fetches the row to confirm persistence
    /// 5. Delivers the code by mail, bounded by the configured timeout
    ///
    /// The code stays persisted even when delivery fails; the caller only
    /// sees the generic notification failure.
    ///
    /// # Returns
    ///
    /// * `Ok(OneTimeCode)` - The persisted, delivered code
    /// * `Err(DomainError)` - Outstanding-code conflict, storage failure or
    ///   delivery failure
    pub async fn issue(&self, user: &User, purpose: CodePurpose) -> DomainResult<OneTimeCode> {
        if self
            .otp_repository
            .find_outstanding(user.id, purpose)
            .await?
            .is_some()
        {
            tracing::warn!(
                user_id = %user.id,
                purpose = %purpose,
                event = "otp_already_outstanding",
                "Rejected code request while a code is outstanding"
            );
            return Err(DomainError::Auth(AuthError::CodeAlreadySent));
        }

        let code = OneTimeCode::new(user.id, purpose, self.config.code_expiration_minutes);
        // The repository enforces the same guard atomically; two concurrent
        // requests cannot both pass the check above and both insert.
        let created = self.otp_repository.create(code).await?;

        let persisted = self
            .otp_repository
            .find_by_id(created.id)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: "Issued one-time code missing after insert".to_string(),
            })?;

        tracing::info!(
            user_id = %user.id,
            purpose = %purpose,
            code_id = %persisted.id,
            event = "otp_issued",
            "Issued one-time code"
        );

        let subject = match purpose {
            CodePurpose::PasswordReset => "Reset Password Request | GateKeeper",
            CodePurpose::AccountVerify => "User Verification | GateKeeper",
        };

        let delivery = self.mailer.send_code(&user.email, subject, &persisted.code);
        match tokio::time::timeout(Duration::from_secs(self.config.notify_timeout_secs), delivery)
            .await
        {
            Ok(Ok(message_id)) => {
                tracing::info!(
                    user_id = %user.id,
                    purpose = %purpose,
                    message_id = %message_id,
                    event = "otp_mail_sent",
                    "Delivered one-time code"
                );
                Ok(persisted)
            }
            Ok(Err(error)) => {
                tracing::error!(
                    user_id = %user.id,
                    purpose = %purpose,
                    error = %error,
                    event = "otp_mail_failed",
                    "Mail delivery failed; code remains outstanding"
                );
                Err(DomainError::Auth(AuthError::NotificationFailed))
            }
            Err(_) => {
                tracing::error!(
                    user_id = %user.id,
                    purpose = %purpose,
                    timeout_secs = self.config.notify_timeout_secs,
                    event = "otp_mail_timeout",
                    "Mail delivery timed out; code remains outstanding"
                );
                Err(DomainError::Auth(AuthError::NotificationFailed))
            }
        }
    }

    /// Find the outstanding code for a (user, purpose) pair
    pub async fn find_outstanding(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> DomainResult<Option<OneTimeCode>> {
        self.otp_repository.find_outstanding(user_id, purpose).await
    }

    /// Find an outstanding code by the owner's email and exact code value
    pub async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> DomainResult<Option<OneTimeCode>> {
        self.otp_repository
            .find_by_email_and_code(email, code, purpose)
            .await
    }

    /// Consume a code so it can never be used again
    pub async fn consume(&self, id: Uuid) -> DomainResult<()> {
        self.otp_repository.expire(id).await?;
        tracing::info!(code_id = %id, event = "otp_consumed", "Consumed one-time code");
        Ok(())
    }

    /// Reinstate a consumed code after a failed follow-up write
    pub async fn reinstate(&self, id: Uuid) -> DomainResult<()> {
        self.otp_repository.reinstate(id).await?;
        tracing::warn!(code_id = %id, event = "otp_reinstated", "Reinstated one-time code");
        Ok(())
    }
}
