//! Email address utilities

/// Mask an email address for logging (e.g., a***@example.com)
///
/// Keeps the first character of the local part and the full domain so log
/// lines stay correlatable without exposing the address.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => "***".to_string(),
        },
        _ => "***".to_string(),
    }
}
