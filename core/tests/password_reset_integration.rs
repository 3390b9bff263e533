//! End-to-end exercise of the credential lifecycle: register, login, request
//! a reset code, submit it, and log in again with the new password.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use gk_core::domain::entities::one_time_code::{CodePurpose, CODE_LENGTH};
use gk_core::domain::entities::user::UserRole;
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::{MockOtpRepository, MockUserRepository, OtpRepository};
use gk_core::services::auth::{AuthService, RegisterRequest, ResetPasswordRequest};
use gk_core::services::password::BcryptPasswordHasher;
use gk_core::services::token::{TokenService, TokenServiceConfig};
use gk_core::services::verification::{MailerTrait, OtpService, OtpServiceConfig};

/// Captures delivered codes instead of sending mail
struct RecordingMailer {
    codes: Mutex<Vec<String>>,
}

impl RecordingMailer {
    fn new() -> Self {
        Self {
            codes: Mutex::new(Vec::new()),
        }
    }

    fn last_code(&self) -> Option<String> {
        self.codes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send_code(&self, _to: &str, _subject: &str, code: &str) -> Result<String, String> {
        self.codes.lock().unwrap().push(code.to_string());
        Ok("recorded".to_string())
    }
}

fn build_service() -> (
    AuthService<MockUserRepository, MockOtpRepository, RecordingMailer, BcryptPasswordHasher>,
    Arc<MockOtpRepository>,
    Arc<RecordingMailer>,
    Arc<TokenService>,
) {
    let users = Arc::new(MockUserRepository::new());
    let otps = Arc::new(MockOtpRepository::new(users.clone()));
    let mailer = Arc::new(RecordingMailer::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")));
    let otp_service = Arc::new(OtpService::new(
        otps.clone(),
        mailer.clone(),
        OtpServiceConfig::default(),
    ));
    let service = AuthService::new(
        users,
        otp_service,
        Arc::new(BcryptPasswordHasher::new(4)),
        tokens.clone(),
    );
    (service, otps, mailer, tokens)
}

#[tokio::test]
async fn test_full_password_reset_lifecycle() {
    let (service, otps, mailer, tokens) = build_service();

    // Register
    let user = service
        .register(RegisterRequest {
            name: "Al".to_string(),
            email: "al@x.com".to_string(),
            username: "al".to_string(),
            password: "Abcd1234".to_string(),
            confirm_password: "Abcd1234".to_string(),
        })
        .await
        .expect("registration succeeds");

    // Login with the original password
    let login = service.login("al", "Abcd1234").await.expect("login succeeds");
    let claims = tokens.verify_token(&login.token).unwrap();
    assert_eq!(claims.role, UserRole::Member);
    assert_eq!(claims.username, "al");

    // Request a reset code; it is persisted, outstanding and 6 digits long
    service.request_password_reset("al@x.com").await.unwrap();
    let outstanding = otps
        .find_outstanding(user.id, CodePurpose::PasswordReset)
        .await
        .unwrap()
        .expect("code persisted");
    assert_eq!(outstanding.code.len(), CODE_LENGTH);
    assert!(!outstanding.is_expired);

    let code = mailer.last_code().expect("code delivered");
    assert_eq!(code, outstanding.code);

    // A wrong code is rejected
    let wrong = if code == "999999" { "000000" } else { "999999" };
    let error = service
        .reset_password(ResetPasswordRequest {
            email: "al@x.com".to_string(),
            code: wrong.to_string(),
            password: "Abcd5678".to_string(),
            confirm_password: "Abcd5678".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        DomainError::Auth(AuthError::InvalidCodeOrEmail)
    ));
    assert_eq!(error.status_code(), 400);

    // The correct code rotates the password
    service
        .reset_password(ResetPasswordRequest {
            email: "al@x.com".to_string(),
            code,
            password: "Abcd5678".to_string(),
            confirm_password: "Abcd5678".to_string(),
        })
        .await
        .expect("reset succeeds");

    // Old password no longer works, the new one does
    let stale = service.login("al", "Abcd1234").await.unwrap_err();
    assert!(matches!(
        stale,
        DomainError::Auth(AuthError::InvalidCredential)
    ));
    service.login("al", "Abcd5678").await.expect("new password works");
}
