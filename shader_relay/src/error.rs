//! Error types for the shader relay
//!
//! This module defines the error types used throughout the relay,
//! covering request publication, result harvesting, control block
//! decoding and artifact cleanup.

use std::fmt;
use std::path::PathBuf;

/// Result type for shader relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// A request or result file that could not be deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// File that is still on disk
    pub path: PathBuf,
    /// Underlying I/O error message
    pub reason: String,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.reason)
    }
}

/// Fieldless discriminant of [`Error`]
///
/// Lets callers branch on the failure category without matching on
/// payloads. `CleanupAfterFailure` reports the kind of its primary error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputNotFound,
    ResultMissing,
    MalformedControlBlock,
    CleanupError,
    PublishFailed,
    OutputWriteFailed,
    InvalidConfig,
}

/// Shader relay errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A caller-supplied source path does not exist
    InputNotFound(PathBuf),

    /// A caller-supplied source path exists but could not be read
    InputUnreadable {
        path: PathBuf,
        reason: String,
    },

    /// A result file could not be read after the wait completed
    ResultMissing {
        job: String,
        path: PathBuf,
        reason: String,
    },

    /// Control block too short to hold the known fields
    MalformedControlBlock {
        len: usize,
        required: usize,
    },

    /// One or more batch artifacts could not be deleted
    CleanupError(Vec<CleanupFailure>),

    /// A primary failure followed by cleanup failures
    CleanupAfterFailure {
        primary: Box<Error>,
        cleanup: Vec<CleanupFailure>,
    },

    /// A request file could not be written
    PublishFailed {
        job: String,
        path: PathBuf,
        reason: String,
    },

    /// A derived output file could not be written
    OutputWriteFailed {
        path: PathBuf,
        reason: String,
    },

    /// Unusable configuration value
    InvalidConfig(String),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputNotFound(_) | Error::InputUnreadable { .. } => ErrorKind::InputNotFound,
            Error::ResultMissing { .. } => ErrorKind::ResultMissing,
            Error::MalformedControlBlock { .. } => ErrorKind::MalformedControlBlock,
            Error::CleanupError(_) => ErrorKind::CleanupError,
            Error::CleanupAfterFailure { primary, .. } => primary.kind(),
            Error::PublishFailed { .. } => ErrorKind::PublishFailed,
            Error::OutputWriteFailed { .. } => ErrorKind::OutputWriteFailed,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// The error that caused the failure, ignoring any trailing cleanup failures
    pub fn primary(&self) -> &Error {
        match self {
            Error::CleanupAfterFailure { primary, .. } => primary.primary(),
            other => other,
        }
    }

    /// Cleanup failures carried by this error (empty if none)
    pub fn cleanup_failures(&self) -> &[CleanupFailure] {
        match self {
            Error::CleanupError(failures) => failures,
            Error::CleanupAfterFailure { cleanup, .. } => cleanup,
            _ => &[],
        }
    }

    /// Attach cleanup failures to a primary error
    ///
    /// Returns `self` unchanged when `cleanup` is empty.
    pub fn with_cleanup(self, cleanup: Vec<CleanupFailure>) -> Error {
        if cleanup.is_empty() {
            return self;
        }
        Error::CleanupAfterFailure {
            primary: Box::new(self),
            cleanup,
        }
    }
}

fn join_failures(failures: &[CleanupFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputNotFound(path) => write!(f, "{} does not exist", path.display()),
            Error::InputUnreadable { path, reason } => {
                write!(f, "Failed to read {}: {}", path.display(), reason)
            }
            Error::ResultMissing { job, path, reason } => {
                write!(f, "Result missing for '{}': {} ({})", job, path.display(), reason)
            }
            Error::MalformedControlBlock { len, required } => write!(
                f,
                "Malformed control block: {} bytes, at least {} required",
                len, required
            ),
            Error::CleanupError(failures) => {
                write!(f, "Cleanup failed: {}", join_failures(failures))
            }
            Error::CleanupAfterFailure { primary, cleanup } => write!(
                f,
                "{}; cleanup also failed: {}",
                primary,
                join_failures(cleanup)
            ),
            Error::PublishFailed { job, path, reason } => {
                write!(f, "Failed to publish '{}' to {}: {}", job, path.display(), reason)
            }
            Error::OutputWriteFailed { path, reason } => {
                write!(f, "Failed to write {}: {}", path.display(), reason)
            }
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
