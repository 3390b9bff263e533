//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the GateKeeper
//! application. It provides the concrete implementations behind the core's
//! repository and notifier traits:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: HTTP mail-API delivery for one-time codes

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - outbound code delivery
pub mod email;

/// Load application configuration from the environment
///
/// Reads a `.env` file when present, then builds the explicit configuration
/// structs the components are constructed with.
pub fn load_config() -> gk_shared::config::AppConfig {
    dotenvy::dotenv().ok();
    gk_shared::config::AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),
}
