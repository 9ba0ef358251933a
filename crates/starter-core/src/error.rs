//! Error types for template fetching and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `StarterError`.
pub type Result<T> = std::result::Result<T, StarterError>;

/// Errors that can occur while scaffolding a project.
#[derive(Error, Debug)]
pub enum StarterError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or not a zip archive.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An archive entry resolved outside the destination directory.
    #[error("{}: illegal file path", path.display())]
    IllegalPath {
        /// The offending destination path.
        path: PathBuf,
    },

    /// Transport-level download failure.
    #[error("failed to download {url}: {reason}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// Transport error description.
        reason: String,
    },

    /// The remote answered with a non-success status.
    #[error("bad status: {status} ({url})")]
    BadStatus {
        /// The URL being fetched.
        url: String,
        /// Status line returned by the server.
        status: String,
    },

    /// Configuration values are unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl StarterError {
    /// Returns `true` if this error represents a path-containment violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use starter_core::StarterError;
    /// use std::path::PathBuf;
    ///
    /// let err = StarterError::IllegalPath {
    ///     path: PathBuf::from("/out/../evil"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = StarterError::InvalidArchive("truncated".to_string());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::IllegalPath { .. })
    }

    /// Returns `true` if the error came from the network transport or the
    /// remote server. These are the only errors the fetcher recovers from
    /// (by falling back to a stale cache).
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::BadStatus { .. })
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use starter_core::StarterError;
    ///
    /// let err = StarterError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// let err = StarterError::InvalidConfig {
    ///     reason: "empty package name".to_string(),
    /// };
    /// assert_eq!(err.context(), Some("empty package name"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::Network { reason, .. } | Self::InvalidConfig { reason } => Some(reason),
            Self::BadStatus { status, .. } => Some(status),
            Self::Io(_) | Self::IllegalPath { .. } => None,
        }
    }
}

impl From<zip::result::ZipError> for StarterError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for StarterError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "<unknown>".to_string(), ToString::to_string);
        Self::Network {
            url,
            reason: err.to_string(),
        }
    }
}
