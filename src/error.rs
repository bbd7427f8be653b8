//! Error types for cf-ddns.

use thiserror::Error;

/// Result type alias for cf-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Missing/unreadable config file or missing credential.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Cloudflare rejected a request or answered with an unexpected shape.
    #[error("Provider error (cloudflare): {0}")]
    Provider(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}

impl From<dotenvy::Error> for DdnsError {
    fn from(e: dotenvy::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}
