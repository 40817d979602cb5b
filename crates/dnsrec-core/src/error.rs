//! Error types for the dnsrec system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for record store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dnsrec system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider could not acquire its connection to the backend.
    ///
    /// Aborts the whole operation.
    #[error("failed to get {step}: {message}")]
    Connector {
        /// Which capability could not be built (e.g. "connector", "object manager")
        step: String,
        /// Underlying cause
        message: String,
    },

    /// A bulk record query failed
    #[error("failed to get {record_type} records: {message}")]
    Query {
        /// Record type that was being listed
        record_type: String,
        /// Underlying cause
        message: String,
    },

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Record or object not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend rejected the request
    #[error("API error ({status}{}): {message}", .code.as_deref().map(|c| format!(", {c}")).unwrap_or_default())]
    Api {
        /// HTTP status returned by the backend
        status: u16,
        /// Backend-specific error code, if any
        code: Option<String>,
        /// Error message
        message: String,
    },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connector acquisition error
    pub fn connector(step: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Connector {
            step: step.into(),
            message: err.to_string(),
        }
    }

    /// Create a bulk query error
    pub fn query(record_type: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Query {
            record_type: record_type.into(),
            message: err.to_string(),
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a backend API error
    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Whether this error means the requested object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
