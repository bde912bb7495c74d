//! Unified error types for the admin client.
//!
//! Validation failures are not errors in this sense: they are reported per field
//! through [`crate::core::FieldErrors`] and never reach the network.

use thiserror::Error;

/// Errors raised by configuration loading and by calls to the REST service.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The service answered with a non-2xx status. `message` is the server's
    /// `detail` string, or a generic fallback, and is shown to the user verbatim.
    #[error("{message}")]
    Api {
        /// HTTP status code, when one was received
        status: Option<u16>,
        /// User-visible failure message
        message: String,
    },

    /// The request never produced a response (connection refused, DNS, reset).
    #[error("{message}")]
    Transport {
        /// User-visible failure message
        message: String,
    },

    /// The request did not complete in time
    #[error("Request timed out after {seconds}s")]
    Timeout {
        /// Timeout that elapsed, in seconds
        seconds: u64,
    },

    /// A request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or not valid UTF-8
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        // Timeouts are mapped by the REST client, which knows the configured limit.
        if value.is_decode() {
            return Self::Transport {
                message: format!("Invalid response body: {value}"),
            };
        }
        Self::Transport {
            message: value.to_string(),
        }
    }
}

impl Error {
    /// HTTP status attached to the error, if the server produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
