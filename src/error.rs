//! Error types for release publishing operations.
//!
//! Every failure carries enough context to tell the operator what to fix.
//! Remote failures are classified once, where the HTTP response is received,
//! so the publishing logic switches on [`RemoteErrorKind`] instead of
//! inspecting messages.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release publishing operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release publishing operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Configuration and credential errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A remote service rejected a request
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// A local artifact expected by the upload plan does not exist
    #[error("Artifact not found: {}", path.display())]
    MissingArtifact {
        /// Local path that was expected
        path: PathBuf,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP errors (connection, TLS, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed endpoint URLs
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Configuration errors, raised before any network activity
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential or setting is absent or empty
    #[error("Missing required value '{key}'")]
    MissingValue {
        /// Property or environment variable name
        key: String,
    },

    /// A configured endpoint cannot be used as a base URL
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// Offending URL
        url: String,
        /// Reason for the error
        reason: String,
    },
}

/// How a remote failure should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The requested record does not exist yet and may be created
    NotFound,
    /// Anything else: authentication, validation, server errors
    Other,
}

/// A non-success reply from a remote service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed with status {status}: {message}")]
pub struct RemoteError {
    /// Classification decided at the HTTP boundary
    pub kind: RemoteErrorKind,
    /// Operation that was attempted
    pub operation: String,
    /// HTTP status code
    pub status: u16,
    /// Message reported by the service
    pub message: String,
}

impl RemoteError {
    /// Create an unclassified remote failure
    pub fn other(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Other,
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    /// Build a failure from a rejected response body.
    ///
    /// The message is the body's JSON `message` field when present, the
    /// trimmed body otherwise.
    pub fn from_body(operation: impl Into<String>, status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ApiMessage {
            message: String,
        }

        let message = serde_json::from_str::<ApiMessage>(body)
            .map(|m| m.message)
            .unwrap_or_else(|_| body.trim().to_string());
        Self::other(operation, status, message)
    }

    /// Whether the failure means the record is absent
    pub fn is_not_found(&self) -> bool {
        self.kind == RemoteErrorKind::NotFound
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The command line could not be parsed
    #[error("{0}")]
    Parse(#[from] clap::Error),
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::MissingValue { key }) => vec![
                format!("Export {key} in the environment"),
                "Or provide it in bintray.properties as KEY=value".to_string(),
            ],
            ReleaseError::Remote(RemoteError { status: 401, .. })
            | ReleaseError::Remote(RemoteError { status: 403, .. }) => vec![
                "Verify the user and API key are valid".to_string(),
                "Check the account has write access to the target repository".to_string(),
            ],
            ReleaseError::MissingArtifact { .. } => vec![
                "Run the release build before publishing".to_string(),
                "Check --project-root points at the repository root".to_string(),
            ],
            ReleaseError::Cli(CliError::MissingArgument { argument }) => {
                vec![format!("Pass {argument} on the command line")]
            }
            ReleaseError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see the accepted arguments".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Whether this error is a remote "record absent" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReleaseError::Remote(e) if e.is_not_found())
    }
}
