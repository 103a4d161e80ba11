//! Error types for vcworkspace

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for vcworkspace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for a command line that selects no valid mode
pub const USAGE_EXIT_CODE: i32 = 2;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),

    #[error(
        "Application name \"{app_name}\" does not yield a valid workspace name"
    )]
    InvalidWorkspaceName { app_name: String },

    #[error("{failed} of {total} applications could not be provisioned; see the log for details")]
    BatchIncomplete { failed: usize, total: usize },
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => USAGE_EXIT_CODE,
            _ => 1,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check your Veracode API key id and secret.")]
    Unauthorized,

    #[error("Access denied. These API credentials lack permission for this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(
        "Veracode API credentials not configured. Set VERACODE_API_KEY_ID and \
         VERACODE_API_KEY_SECRET or add them to ~/.veracode/credentials."
    )]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
