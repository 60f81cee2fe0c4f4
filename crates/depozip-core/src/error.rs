//! Error types for archiving and deposition operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DepositError`.
pub type Result<T> = std::result::Result<T, DepositError>;

/// Errors that can occur while archiving a directory or depositing it.
#[derive(Error, Debug)]
pub enum DepositError {
    /// The directory to archive does not exist or is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The resolved path that was rejected.
        path: PathBuf,
    },

    /// A caller-supplied value was rejected before any work was done.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote deposition service failed or rejected the request.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl DepositError {
    /// Returns `true` if the error was caused by caller input.
    ///
    /// # Examples
    ///
    /// ```
    /// use depozip_core::DepositError;
    /// use std::path::PathBuf;
    ///
    /// let err = DepositError::NotADirectory {
    ///     path: PathBuf::from("/missing"),
    /// };
    /// assert!(err.is_invalid_input());
    /// assert!(!err.is_remote());
    /// ```
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::NotADirectory { .. } | Self::InvalidInput { .. })
    }

    /// Returns `true` if the error came from the remote deposition service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Errors reported by a deposition client.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// No access token was configured for the selected endpoint.
    #[error("no access token configured (set {var})")]
    MissingToken {
        /// Environment variable the token is read from.
        var: &'static str,
    },

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body, as returned by the service.
        body: String,
    },

    /// A file to upload could not be read.
    #[error("cannot read {path}: {source}")]
    File {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The service answered with a body that lacks a required field.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Returns `true` if the service rejected the credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use depozip_core::RemoteError;
    ///
    /// let err = RemoteError::Status {
    ///     status: 403,
    ///     url: "https://sandbox.zenodo.org/api/deposit/depositions".into(),
    ///     body: "{}".into(),
    /// };
    /// assert!(err.is_auth_failure());
    /// ```
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingToken { .. } | Self::Status { status: 401 | 403, .. }
        )
    }
}
