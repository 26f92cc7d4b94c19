//! Error types for the staging-and-assembly pipeline.
//!
//! Every failure carries a human-readable message and maps to a coarse
//! [`ErrorKind`], which is what the CLI prints in front of the message.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of a pipeline failure, as reported to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required path does not exist.
    Reference,
    /// A path exists but is the wrong kind.
    State,
    /// A required host tool is missing.
    Resource,
    /// The bundling tool failed.
    Bundle,
    /// Two assets share a display name.
    DuplicateAsset,
    /// Caller-supplied arguments could not be used.
    Argument,
    /// Anything else.
    Unknown,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Reference => "Reference Error",
            Self::State => "State Error",
            Self::Resource => "Resource Error",
            Self::Bundle => "Bundle Error",
            Self::DuplicateAsset => "Duplicate Asset Error",
            Self::Argument => "Argument Error",
            Self::Unknown => "Unknown Error",
        };
        f.write_str(label)
    }
}

/// Errors raised by the pipeline stages.
#[derive(Error, Debug)]
pub enum Error {
    /// A required path does not exist.
    #[error("'{}' does not exist", .path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A path exists but is not what the stage expected.
    #[error("'{}' is not a {expected}", .path.display())]
    WrongKind {
        /// Offending path
        path: PathBuf,
        /// What was expected ("directory", "file")
        expected: &'static str,
    },

    /// A required host tool could not be located.
    #[error("{tool} must be installed globally on your system{}", hint_suffix(.hint))]
    MissingTool {
        /// Tool name
        tool: String,
        /// Optional detail (e.g. what was searched)
        hint: Option<String>,
    },

    /// A host resource other than a tool is unavailable.
    #[error("{0}")]
    Resource(String),

    /// The module bundler rejected the program.
    #[error("{0}")]
    Bundle(String),

    /// Two assets resolve to the same display name.
    #[error("'{name}' has been declared multiple times ('{}' and '{}')", .first.display(), .second.display())]
    DuplicateAsset {
        /// Shared display name
        name: String,
        /// Path that claimed the name first
        first: PathBuf,
        /// Path that collided with it
        second: PathBuf,
    },

    /// A caller-supplied value is unusable.
    #[error("{0}")]
    InvalidArgument(String),

    /// A process could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that failed to start
        command: String,
        /// Underlying spawn error
        error: io::Error,
    },

    /// A process ran but exited unsuccessfully.
    #[error("`{command}` exited with {}", describe_exit(.code, .stderr))]
    ToolFailed {
        /// Command line that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed stderr output
        stderr: String,
    },

    /// A filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Action being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        error: io::Error,
    },

    /// IO error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// JSON serialization error.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Category shown to the user for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::Reference,
            Self::WrongKind { .. } => ErrorKind::State,
            Self::MissingTool { .. } | Self::Resource(_) => ErrorKind::Resource,
            Self::Bundle(_) => ErrorKind::Bundle,
            Self::DuplicateAsset { .. } => ErrorKind::DuplicateAsset,
            Self::InvalidArgument(_) => ErrorKind::Argument,
            Self::CommandFailed { .. }
            | Self::ToolFailed { .. }
            | Self::Fs { .. }
            | Self::IoError(_)
            | Self::Json(_)
            | Self::GenericError(_) => ErrorKind::Unknown,
        }
    }

    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Shorthand for [`Error::WrongKind`].
    pub fn wrong_kind(path: impl Into<PathBuf>, expected: &'static str) -> Self {
        Self::WrongKind {
            path: path.into(),
            expected,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref()
        .map(|h| format!(" ({h})"))
        .unwrap_or_default()
}

fn describe_exit(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// Attaches a message to an `Option` or `Result`, producing a [`Error::GenericError`].
pub trait Context<T> {
    /// Adds static context.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Adds lazily built context.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| match e.kind() {
            // Categorized failures pass through unchanged.
            ErrorKind::Unknown => Error::GenericError(format!("{context}: {e}")),
            _ => e,
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| match e.kind() {
            ErrorKind::Unknown => Error::GenericError(format!("{}: {e}", f())),
            _ => e,
        })
    }
}

/// Extension for IO results that records which path an operation touched.
pub trait ErrorExt<T> {
    /// Wraps the IO error with an action description and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
