//! Error types for the repolens client core.
//!
//! Two layers of errors live here. [`TransportError`] is what the transport
//! collaborator raises for a single GET; workflows never let it escape and
//! instead fold it into a failure event. [`RepolensError`] is the crate-level
//! error used by configuration loading, the runtime, and the CLI.

use thiserror::Error;

/// Failure raised by a [`Transport`](crate::transport::Transport) call.
///
/// Every variant except [`TransportError::Unlabeled`] carries a
/// human-readable message. Workflows substitute their own fallback string
/// when [`TransportError::message`] returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The request did not complete within the transport's fixed timeout.
    #[error("timeout of {millis}ms exceeded")]
    Timeout {
        /// Configured timeout in milliseconds.
        millis: u64,
    },

    /// Connection-level failure (DNS, TLS, reset).
    #[error("Network Error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// A failure that carries no message at all.
    #[error("transport failure")]
    Unlabeled,
}

impl TransportError {
    /// Returns the human-readable message, if the error carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::domain::TransportError;
    ///
    /// assert_eq!(TransportError::Unlabeled.message(), None);
    /// assert_eq!(
    ///     TransportError::Status { status: 404 }.message().as_deref(),
    ///     Some("Request failed with status code 404")
    /// );
    /// ```
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Unlabeled => None,
            other => Some(other.to_string()),
        }
    }

    /// Returns the message, or `fallback` when the error has none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }
}

/// The main error type for repolens operations outside the workflows.
#[derive(Debug, Error)]
pub enum RepolensError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dispatcher lost contact with its worker tasks.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for repolens operations.
pub type Result<T> = std::result::Result<T, RepolensError>;
