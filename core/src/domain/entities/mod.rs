//! Domain entities for the GateKeeper system.

pub mod one_time_code;
pub mod user;

pub use one_time_code::{CodePurpose, OneTimeCode, CODE_LENGTH};
pub use user::{User, UserRole};
