//! Core error types for placario-core.
//!
//! Errors cover the I/O boundaries only: configuration files, the keyring,
//! and the management API. Domain lookups (period tables, guard decisions)
//! signal absence with `Option`/`bool` and never fail.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for placario-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication/session errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Authentication and session errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login attempt rejected by the API
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// Session renewal rejected by the API
    #[error("Session renewal failed: {0}")]
    RenewFailed(String),

    /// No authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session expired and no refresh token available
    #[error("Session expired and no refresh token available")]
    SessionExpired,

    /// API endpoint configuration is unusable
    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    /// Keyring access failed
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Stored token payload could not be encoded
    #[error("Token serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
