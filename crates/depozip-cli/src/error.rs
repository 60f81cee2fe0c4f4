//! Error conversion utilities for CLI.
//!
//! Converts depozip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use depozip_core::DepositError;
use depozip_core::RemoteError;
use depozip_core::ZenodoConfig;
use std::path::Path;

/// Converts `DepositError` to user-friendly anyhow error with context
pub fn convert_deposit_error(err: DepositError, dir: &Path, sandbox: bool) -> anyhow::Error {
    match err {
        DepositError::NotADirectory { path } => {
            anyhow!(
                "Not a directory: '{}'\n\
                 HINT: Use --dir to point at the directory you want to upload.",
                path.display()
            )
        }
        DepositError::InvalidInput { reason } => {
            anyhow!(
                "Invalid input: {reason}\n\
                 HINT: Check the --title, --creator, --license and --output values."
            )
        }
        DepositError::Io(io_err) => {
            anyhow!("I/O error while archiving '{}': {}", dir.display(), io_err)
        }
        DepositError::Remote(remote) => convert_remote_error(remote, sandbox),
    }
}

/// Converts `RemoteError` to user-friendly anyhow error with context
pub fn convert_remote_error(err: RemoteError, sandbox: bool) -> anyhow::Error {
    let token_var = ZenodoConfig::new(sandbox).token_var();
    let endpoint = if sandbox { "sandbox" } else { "production" };

    match err {
        RemoteError::MissingToken { var } => {
            anyhow!(
                "No Zenodo access token found for the {endpoint} endpoint\n\
                 HINT: Create a personal access token with the deposit:write and \
                 deposit:actions scopes and export it as {var}."
            )
        }
        RemoteError::Status {
            status: status @ (401 | 403),
            ..
        } => {
            let other = if sandbox { "production" } else { "sandbox" };
            anyhow!(
                "Zenodo rejected the access token (HTTP {status})\n\
                 HINT: Check {token_var}. Tokens for the {other} endpoint do not work on \
                 {endpoint}."
            )
        }
        RemoteError::Status { status, url, body } => {
            anyhow!("Zenodo returned HTTP {status} for {url}\n{body}")
        }
        RemoteError::Transport(transport) => anyhow::Error::from(transport).context(format!(
            "Could not reach the Zenodo {endpoint} endpoint\n\
             HINT: Check your network connection."
        )),
        other => anyhow::Error::from(other).context("Zenodo upload failed"),
    }
}

/// Adds upload context to a core result
pub fn add_deposit_context<T>(
    result: Result<T, DepositError>,
    dir: &Path,
    sandbox: bool,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_deposit_error(e, dir, sandbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_not_a_directory() {
        let err = DepositError::NotADirectory {
            path: PathBuf::from("/missing"),
        };
        let msg = format!("{:?}", convert_deposit_error(err, Path::new("."), false));
        assert!(msg.contains("Not a directory"));
        assert!(msg.contains("/missing"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_missing_token_names_variable() {
        let err: DepositError = RemoteError::MissingToken {
            var: "ZENODO_SANDBOX_API_TOKEN",
        }
        .into();
        let msg = format!("{:?}", convert_deposit_error(err, Path::new("."), true));
        assert!(msg.contains("sandbox"));
        assert!(msg.contains("ZENODO_SANDBOX_API_TOKEN"));
    }

    #[test]
    fn test_convert_auth_failure_mentions_other_endpoint() {
        let err = RemoteError::Status {
            status: 401,
            url: "https://zenodo.org/api/deposit/depositions".to_string(),
            body: String::new(),
        };
        let msg = format!("{:?}", convert_remote_error(err, false));
        assert!(msg.contains("HTTP 401"));
        assert!(msg.contains("ZENODO_API_TOKEN"));
        assert!(msg.contains("sandbox endpoint do not work"));
    }

    #[test]
    fn test_convert_status_keeps_body() {
        let err = RemoteError::Status {
            status: 400,
            url: "https://zenodo.org/api/deposit/depositions".to_string(),
            body: "Validation error.".to_string(),
        };
        let msg = format!("{:?}", convert_remote_error(err, false));
        assert!(msg.contains("HTTP 400"));
        assert!(msg.contains("Validation error."));
    }

    #[test]
    fn test_convert_io_error() {
        let err = DepositError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let msg = format!("{:?}", convert_deposit_error(err, Path::new("data"), false));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("data"));
    }
}
