//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use gk_shared::utils::email::mask_email;

use crate::domain::entities::one_time_code::CodePurpose;
use crate::domain::entities::user::User;
use crate::domain::value_objects::LoginResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};
use crate::services::password::PasswordHasherTrait;
use crate::services::token::TokenService;
use crate::services::verification::{MailerTrait, OtpService};

use super::types::{RegisterRequest, ResetPasswordRequest, VerificationOutcome};
use super::validation::{validate_code_format, validate_new_password, validate_registration};

/// Authentication service orchestrating the credential lifecycle
///
/// Composes the credential store, the OTP service, the password hasher and
/// the token issuer. Each request is handled sequentially; all cross-request
/// state lives behind the repositories.
pub struct AuthService<U, O, M, H>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerTrait,
    H: PasswordHasherTrait,
{
    /// User repository for credential storage
    user_repository: Arc<U>,
    /// One-time-code issuance and consumption
    otp_service: Arc<OtpService<O, M>>,
    /// Password hashing
    hasher: Arc<H>,
    /// Session token issuing
    token_service: Arc<TokenService>,
}

impl<U, O, M, H> AuthService<U, O, M, H>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerTrait,
    H: PasswordHasherTrait,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<O, M>>,
        hasher: Arc<H>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            hasher,
            token_service,
        }
    }

    /// Authenticate a user by username and password
    ///
    /// Unknown usernames and wrong passwords produce the identical
    /// `InvalidCredential` outcome so callers cannot enumerate accounts.
    /// Success mints a stateless token embedding id, username and role;
    /// nothing is written to storage either way.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResponse> {
        let user = match self.user_repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(event = "login_failed", "Login attempt for unknown username");
                return Err(DomainError::Auth(AuthError::InvalidCredential));
            }
        };

        if !self.hasher.verify(&user.password_hash, password) {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                "Login attempt with wrong password"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredential));
        }

        let token = self.token_service.sign_token(&user)?;

        tracing::info!(user_id = %user.id, event = "login_success", "User logged in");
        Ok(LoginResponse::new(token))
    }

    /// Register a new user
    ///
    /// Validation is all-or-nothing: field checks run first, then username
    /// and email uniqueness each append their own error, then the
    /// password-confirmation comparison; the full list comes back in one
    /// response. On success the password is hashed, the confirmation is
    /// dropped, and the user is inserted with the default `Member` role.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<User> {
        let mut errors = validate_registration(&request);

        if self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            errors.add_error(
                "username",
                "Username has already been used",
                "DUPLICATE_VALUE",
            );
        }
        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            errors.add_error("email", "Email has already been used", "DUPLICATE_VALUE");
        }
        if request.password != request.confirm_password {
            errors.add_error(
                "confirm_password",
                "Confirm password is not the same",
                "MISMATCH",
            );
        }

        if errors.has_errors() {
            return Err(DomainError::Validation(errors));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        // Only the hash survives; the confirmation field ends here.
        let user = User::new(
            request.name,
            request.email,
            request.username,
            password_hash,
        );
        let created = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %created.id,
            email = %mask_email(&created.email),
            event = "user_registered",
            "Registered new user"
        );
        Ok(created)
    }

    /// Request a password-reset code (forgot-password phase A)
    ///
    /// Unknown emails are a client error; an outstanding reset code rejects
    /// the request rather than re-issuing. Issuance and delivery are handled
    /// by the OTP service.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::EmailNotFound))?;

        self.otp_service
            .issue(&user, CodePurpose::PasswordReset)
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(email),
            event = "password_reset_requested",
            "Password reset code issued"
        );
        Ok(())
    }

    /// Submit a password-reset code with a new password (phase B)
    ///
    /// This method:
    /// 1. Looks up an outstanding code matching (email, code) exactly
    /// 2. Validates the new password and confirmation before touching storage
    /// 3. Hashes the new password (failure is fatal)
    /// 4. Consumes the code, then updates the password; if the update fails
    ///    after consumption, the code is reinstated so a consumed code can
    ///    never coexist with an unchanged password
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> DomainResult<()> {
        let code = self
            .otp_service
            .find_by_email_and_code(&request.email, &request.code, CodePurpose::PasswordReset)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCodeOrEmail))?;

        let errors = validate_new_password(&request.password, &request.confirm_password);
        if errors.has_errors() {
            return Err(DomainError::Validation(errors));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let mut user = self
            .user_repository
            .find_by_id(code.user_id)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: format!("Owner of one-time code {} not found", code.id),
            })?;

        self.otp_service.consume(code.id).await?;

        user.set_password(password_hash);
        if let Err(error) = self.user_repository.update(user).await {
            self.compensate_consumed_code(code.id).await;
            tracing::error!(
                user_id = %code.user_id,
                error = %error,
                event = "password_update_failed",
                "Password update failed after code consumption"
            );
            return Err(DomainError::Internal {
                message: "Password update affected no rows".to_string(),
            });
        }

        tracing::info!(
            user_id = %code.user_id,
            event = "password_reset",
            "Password has been updated"
        );
        Ok(())
    }

    /// Verify the calling user's account (two-phase)
    ///
    /// The identity comes from the caller's session, never the request body.
    /// Absence of `code` always runs phase A: issue and mail a verification
    /// code (the outstanding-code guard is re-checked inside issuance). With
    /// a code present, phase B matches it against the outstanding code in
    /// constant time, consumes it and sets the verified flag, with the same
    /// compensation rule as the password-reset flow.
    pub async fn verify_account(
        &self,
        user_id: Uuid,
        code: Option<&str>,
    ) -> DomainResult<VerificationOutcome> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: format!("Authenticated user {} not found", user_id),
            })?;

        if user.is_verified {
            return Err(DomainError::Auth(AuthError::AlreadyVerified));
        }

        let submitted = match code {
            None => {
                self.otp_service
                    .issue(&user, CodePurpose::AccountVerify)
                    .await?;
                return Ok(VerificationOutcome::CodeSent);
            }
            Some(submitted) => submitted,
        };

        let errors = validate_code_format(submitted);
        if errors.has_errors() {
            return Err(DomainError::Validation(errors));
        }

        let outstanding = self
            .otp_service
            .find_outstanding(user.id, CodePurpose::AccountVerify)
            .await?
            .ok_or(DomainError::Auth(AuthError::CodeNotFoundOrExpired))?;

        if !outstanding.matches(submitted) {
            tracing::warn!(
                user_id = %user.id,
                event = "verification_code_mismatch",
                "Submitted verification code does not match"
            );
            return Err(DomainError::Auth(AuthError::InvalidCode));
        }

        self.otp_service.consume(outstanding.id).await?;

        let mut user = user;
        user.verify();
        if let Err(error) = self.user_repository.update(user).await {
            self.compensate_consumed_code(outstanding.id).await;
            tracing::error!(
                user_id = %user_id,
                error = %error,
                event = "verify_flag_update_failed",
                "Verified-flag update failed after code consumption"
            );
            return Err(DomainError::Internal {
                message: "Verified-flag update affected no rows".to_string(),
            });
        }

        tracing::info!(user_id = %user_id, event = "account_verified", "Account verified");
        Ok(VerificationOutcome::Verified)
    }

    /// Best-effort reinstatement of a consumed code after a failed write
    async fn compensate_consumed_code(&self, code_id: Uuid) {
        if let Err(error) = self.otp_service.reinstate(code_id).await {
            tracing::error!(
                code_id = %code_id,
                error = %error,
                event = "otp_reinstate_failed",
                "Could not reinstate consumed code"
            );
        }
    }
}
