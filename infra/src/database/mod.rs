//! Database module - MySQL implementations using SQLx
//!
//! Provides connection pool management and the repository implementations
//! backing the core's `UserRepository` and `OtpRepository` traits.

pub mod connection;
pub mod mysql;

pub use connection::create_pool;
pub use mysql::{MySqlOtpRepository, MySqlUserRepository};
