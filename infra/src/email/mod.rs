//! Email module - outbound delivery of one-time codes.

pub mod api_mailer;

pub use api_mailer::HttpApiMailer;
