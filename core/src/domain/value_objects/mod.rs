//! Value objects returned by the domain services.

pub mod login_response;

pub use login_response::LoginResponse;
