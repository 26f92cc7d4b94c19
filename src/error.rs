//! Top-level error types for the command line layer.
//!
//! Pipeline failures are carried unchanged in [`BundlerError::Bundler`] so their
//! category survives up to the process boundary.

use crate::bundler::ErrorKind;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Category printed in front of the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Bundler(e) => e.kind(),
            Self::Cli(_) => ErrorKind::Argument,
            Self::Io(_) => ErrorKind::Unknown,
        }
    }

    /// Message without the wrapper prefix, for display next to [`kind`](Self::kind).
    pub fn message(&self) -> String {
        match self {
            Self::Bundler(e) => e.to_string(),
            Self::Cli(CliError::InvalidArguments { reason }) => reason.clone(),
            other => other.to_string(),
        }
    }
}
