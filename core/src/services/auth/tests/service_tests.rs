//! Login and registration tests

use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::auth::AuthService;
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::{OtpService, OtpServiceConfig};
use std::sync::Arc;

use super::mocks::*;

#[tokio::test]
async fn test_login_unknown_user_and_wrong_password_are_indistinguishable() {
    let ctx = test_context();
    ctx.service
        .register(register_request("al", "al@x.com"))
        .await
        .unwrap();

    let unknown_user = ctx.service.login("nobody", "Abcd1234").await.unwrap_err();
    let wrong_password = ctx.service.login("al", "WrongPw99").await.unwrap_err();

    assert!(matches!(
        unknown_user,
        DomainError::Auth(AuthError::InvalidCredential)
    ));
    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredential)
    ));
    // Identical outward shape: same status, same code, same message
    assert_eq!(unknown_user.status_code(), wrong_password.status_code());
    assert_eq!(unknown_user.error_code(), wrong_password.error_code());
    assert_eq!(unknown_user.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn test_login_success_returns_token_with_default_role() {
    let ctx = test_context();
    let user = ctx
        .service
        .register(register_request("al", "al@x.com"))
        .await
        .unwrap();

    let response = ctx.service.login("al", "Abcd1234").await.unwrap();
    let claims = ctx.tokens.verify_token(&response.token).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.username, "al");
    assert_eq!(claims.role, UserRole::Member);
    assert_eq!(response.token_type, "Bearer");
}

#[tokio::test]
async fn test_register_reports_all_field_errors_at_once() {
    let ctx = test_context();
    let request = crate::services::auth::types::RegisterRequest {
        name: String::new(),
        email: "not-an-email".to_string(),
        username: String::new(),
        password: "weak".to_string(),
        confirm_password: String::new(),
    };

    let error = ctx.service.register(request).await.unwrap_err();
    let DomainError::Validation(errors) = error else {
        panic!("expected validation error");
    };

    let fields = errors.to_field_errors();
    for field in ["name", "email", "username", "password", "confirm_password"] {
        assert!(fields.contains_key(field), "missing error for {}", field);
    }
}

#[tokio::test]
async fn test_register_appends_uniqueness_and_confirmation_errors() {
    let ctx = test_context();
    ctx.service
        .register(register_request("al", "al@x.com"))
        .await
        .unwrap();

    let mut request = register_request("al", "al@x.com");
    request.confirm_password = "Other999".to_string();

    let error = ctx.service.register(request).await.unwrap_err();
    let DomainError::Validation(errors) = error else {
        panic!("expected validation error");
    };

    let messages = errors.messages();
    assert!(messages.contains(&"Username has already been used".to_string()));
    assert!(messages.contains(&"Email has already been used".to_string()));
    assert!(messages.contains(&"Confirm password is not the same".to_string()));
    assert_eq!(messages.len(), 3);
}

#[tokio::test]
async fn test_register_persists_hash_not_plaintext() {
    let ctx = test_context();
    let created = ctx
        .service
        .register(register_request("al", "al@x.com"))
        .await
        .unwrap();

    let stored = ctx.users.find_by_id(created.id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "Abcd1234");
    assert!(stored.password_hash.starts_with("$2"));
    assert_eq!(stored.role, UserRole::Member);
    assert!(!stored.is_verified);
}

#[tokio::test]
async fn test_register_hashing_failure_is_a_server_error() {
    let ctx = test_context();
    let otp_service = Arc::new(OtpService::new(
        ctx.otps.clone(),
        ctx.mailer.clone(),
        OtpServiceConfig::default(),
    ));
    let service = AuthService::new(
        ctx.users.clone(),
        otp_service,
        Arc::new(FailingHasher),
        Arc::new(TokenService::new(TokenServiceConfig::new("test-secret"))),
    );

    let error = service
        .register(register_request("al", "al@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(error, DomainError::Auth(AuthError::HashingFailed)));
    assert_eq!(error.status_code(), 500);
    // And nothing was persisted
    assert!(ctx.users.find_by_username("al").await.unwrap().is_none());
}
