//! Password hashing service.

pub mod hasher;

pub use hasher::{BcryptPasswordHasher, PasswordHasherTrait};
