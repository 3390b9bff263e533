//! Shared utilities and common types for the GateKeeper server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Response and error wire structures
//! - Validation utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, EmailConfig};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;
