//! Common validation utilities

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Validation error with field-level details
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
///
/// Errors accumulate; callers collect every violation and return the whole
/// list in one response rather than failing on the first problem.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Flatten to the human-readable messages, in insertion order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Group messages by field name
    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Common validation functions
pub mod validators {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static EMAIL_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

    /// Check if a string is not empty after trimming
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if an email address is plausibly valid
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Check password strength: at least 8 characters with at least one
    /// uppercase letter, one lowercase letter and one digit
    pub fn is_strong_password(password: &str) -> bool {
        password.chars().count() >= 8
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn test_accumulation_preserves_order() {
        let mut errors = ValidationErrors::new();
        errors.add_error("name", "Name is required", "REQUIRED");
        errors.add_error("email", "Email is invalid", "INVALID_FORMAT");

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.messages(),
            vec!["Name is required", "Email is invalid"]
        );
    }

    #[test]
    fn test_to_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add_error("password", "Password is required", "REQUIRED");
        errors.add_error("password", "Password is too weak", "WEAK_PASSWORD");

        let by_field = errors.to_field_errors();
        assert_eq!(by_field["password"].len(), 2);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("al@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn test_password_strength() {
        assert!(is_strong_password("Abcd1234"));
        assert!(!is_strong_password("alllower1"));
        assert!(!is_strong_password("ALLUPPER1"));
        assert!(!is_strong_password("NoDigits"));
        assert!(!is_strong_password("Ab1"));
    }

    #[test]
    fn test_length_between() {
        assert!(length_between("al", 1, 32));
        assert!(!length_between("", 1, 32));
        assert!(!length_between(&"x".repeat(33), 1, 32));
    }
}
