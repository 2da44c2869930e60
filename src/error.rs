//! Error types and handling infrastructure for cbsboard.
//!
//! Library code returns [`DashError`] through the crate-wide [`Result`] alias; the binary wraps
//! it in `anyhow` at the boundary.
//!
//! Only one kind of error is surfaced to the user while the dashboard is running: a load
//! failure (network, HTTP status, I/O or JSON decoding). Everything downstream of a successful
//! load operates on well-typed in-memory data and is infallible.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cbsboard operations.
#[derive(Error, Debug)]
pub enum DashError {
    /// File system related errors while reading a local report document
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Report document does not exist at the given path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Transport-level failure while fetching a remote document
    #[error("Network request failed: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The document was fetched but is not a valid report collection
    #[error("Malformed report document: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Unusable report location (bad URL, unsupported scheme)
    #[error("Invalid report source: {message}")]
    InvalidSource { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Opening a detail page failed
    #[error("Navigation failed: {message}")]
    Navigation { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for cbsboard operations.
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn navigation(message: impl Into<String>) -> Self {
        Self::Navigation {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True for every error that can come out of fetching or decoding the report document.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::FileError { .. }
                | Self::FileNotFound { .. }
                | Self::Network { .. }
                | Self::HttpStatus { .. }
                | Self::Parse { .. }
                | Self::InvalidSource { .. }
        )
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            std::io::ErrorKind::InvalidData => "Invalid data",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        Self::Network {
            message: err.to_string(),
            source: err,
        }
    }
}
