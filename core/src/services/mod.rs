//! Business services composing the domain layer.

pub mod auth;
pub mod password;
pub mod token;
pub mod verification;

pub use auth::AuthService;
pub use password::{BcryptPasswordHasher, PasswordHasherTrait};
pub use token::{Claims, TokenService, TokenServiceConfig};
pub use verification::{MailerTrait, OtpService, OtpServiceConfig};
