//! Input validation for the authentication flows.
//!
//! Checks accumulate into a `ValidationErrors` list; nothing short-circuits,
//! so a client sees every problem in one round trip.

use gk_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::one_time_code::CODE_LENGTH;

use super::types::RegisterRequest;

/// Maximum length of a display name
pub const NAME_MAX_LENGTH: usize = 100;

/// Maximum length of an email address
pub const EMAIL_MAX_LENGTH: usize = 100;

/// Maximum length of a username
pub const USERNAME_MAX_LENGTH: usize = 32;

const PASSWORD_STRENGTH_MESSAGE: &str =
    "Password must be at least 8 characters and contain at least 1 uppercase, 1 lowercase and 1 number";

/// Field-level checks for a registration request
///
/// Covers required/format/length rules only. Uniqueness and the
/// password-confirmation comparison are appended by the caller, in that
/// order, onto the same list.
pub fn validate_registration(request: &RegisterRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !validators::not_empty(&request.name) {
        errors.add_error("name", "Name is required", "REQUIRED");
    } else if !validators::length_between(&request.name, 1, NAME_MAX_LENGTH) {
        errors.add_error(
            "name",
            format!("Name must be at most {} characters", NAME_MAX_LENGTH),
            "INVALID_LENGTH",
        );
    }

    if !validators::not_empty(&request.email) {
        errors.add_error("email", "Email is required", "REQUIRED");
    } else if !validators::is_valid_email(&request.email) {
        errors.add_error("email", "Email is not a valid address", "INVALID_FORMAT");
    } else if !validators::length_between(&request.email, 1, EMAIL_MAX_LENGTH) {
        errors.add_error(
            "email",
            format!("Email must be at most {} characters", EMAIL_MAX_LENGTH),
            "INVALID_LENGTH",
        );
    }

    if !validators::not_empty(&request.username) {
        errors.add_error("username", "Username is required", "REQUIRED");
    } else if !validators::length_between(&request.username, 1, USERNAME_MAX_LENGTH) {
        errors.add_error(
            "username",
            format!("Username must be at most {} characters", USERNAME_MAX_LENGTH),
            "INVALID_LENGTH",
        );
    }

    if !validators::not_empty(&request.password) {
        errors.add_error("password", "Password is required", "REQUIRED");
    } else if !validators::is_strong_password(&request.password) {
        errors.add_error("password", PASSWORD_STRENGTH_MESSAGE, "WEAK_PASSWORD");
    }

    if !validators::not_empty(&request.confirm_password) {
        errors.add_error("confirm_password", "Confirm password is required", "REQUIRED");
    }

    errors
}

/// Checks for a replacement password (password-reset phase B)
///
/// Runs before any storage write so a weak password can never consume a code.
pub fn validate_new_password(password: &str, confirm_password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !validators::is_strong_password(password) {
        errors.add_error("password", PASSWORD_STRENGTH_MESSAGE, "WEAK_PASSWORD");
    }
    if password != confirm_password {
        errors.add_error(
            "confirm_password",
            "Confirm password is not the same",
            "MISMATCH",
        );
    }

    errors
}

/// Shape check for a submitted one-time code
pub fn validate_code_format(code: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        errors.add_error(
            "code",
            format!("Code must be exactly {} digits", CODE_LENGTH),
            "INVALID_FORMAT",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: "Al".to_string(),
            email: "al@x.com".to_string(),
            username: "al".to_string(),
            password: "Abcd1234".to_string(),
            confirm_password: "Abcd1234".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_registration(&valid_request()).is_empty());
    }

    #[test]
    fn test_empty_request_reports_every_field() {
        let request = RegisterRequest {
            name: String::new(),
            email: String::new(),
            username: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        };

        let errors = validate_registration(&request);
        let fields = errors.to_field_errors();
        for field in ["name", "email", "username", "password", "confirm_password"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_length_bounds_enforced() {
        let mut request = valid_request();
        request.username = "u".repeat(USERNAME_MAX_LENGTH + 1);
        request.name = "n".repeat(NAME_MAX_LENGTH + 1);

        let errors = validate_registration(&request);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_weak_password_rejected() {
        let mut request = valid_request();
        request.password = "alllower1".to_string();
        request.confirm_password = "alllower1".to_string();

        let errors = validate_registration(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, "WEAK_PASSWORD");
    }

    #[test]
    fn test_new_password_checks() {
        assert!(validate_new_password("Abcd1234", "Abcd1234").is_empty());
        assert!(validate_new_password("alllower1", "alllower1").has_errors());
        assert!(validate_new_password("Abcd1234", "Abcd5678").has_errors());
    }

    #[test]
    fn test_code_format() {
        assert!(validate_code_format("042137").is_empty());
        assert!(validate_code_format("04213").has_errors());
        assert!(validate_code_format("04213a").has_errors());
        assert!(validate_code_format("0421370").has_errors());
    }
}
