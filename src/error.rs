//! Error type shared by every `ejsfix` command.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while reading, patching, or writing a template.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The file to read does not exist.
    #[error("'{0}' does not exist")]
    NotFound(PathBuf),

    /// The file exists but cannot be read or replaced.
    #[error("permission denied: '{0}'")]
    PermissionDenied(PathBuf),

    /// The file is not valid UTF-8.
    #[error("'{0}' is not valid UTF-8 text")]
    Decode(PathBuf),

    /// Any other I/O failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A rule pattern failed to compile.
    #[error("invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The configuration file is unreadable or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// Command line arguments were rejected.
    #[error("{0}")]
    InvalidArgument(String),

    /// `check` found broken tags.
    #[error("{count} multi-line EJS issue(s) found in '{}'", path.display())]
    IssuesFound { path: PathBuf, count: usize },
}

impl PatchError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, context: &str, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => PatchError::NotFound(path),
            io::ErrorKind::PermissionDenied => PatchError::PermissionDenied(path),
            io::ErrorKind::InvalidData => PatchError::Decode(path),
            _ => PatchError::Io {
                context: format!("{context} '{}'", path.display()),
                source: err,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
