//! Error types for the `lockerdash` core library.

use thiserror::Error;

/// Result type alias using the `lockerdash` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dashboard operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        /// Verbatim `error` field of the response body, when present.
        message: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Server-provided message suitable for showing to the user verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
