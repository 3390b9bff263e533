//! Repository interfaces for data persistence.
//!
//! The core never talks to storage directly; every read and write goes
//! through these traits. In-memory mock implementations live next to each
//! trait for service-level testing.

pub mod otp;
pub mod user;

pub use otp::{MockOtpRepository, OtpRepository};
pub use user::{MockUserRepository, UserRepository};
