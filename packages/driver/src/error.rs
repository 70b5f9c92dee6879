//! Error types shared by every driver.
//!
//! Absence of a resource is not an error at this level: `Driver::get`
//! returns `Ok(None)` for it. `Error::NotFound` only exists for callers that
//! asked for a resource to be present.

use std::path::PathBuf;

/// Errors surfaced by driver operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The process environment cannot satisfy the request, e.g. a `~` path
    /// with no resolvable home directory. Never retried.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A request could not be built from the URL, headers or query it was
    /// given.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// A required resource does not exist.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// A local file could not be opened or fully written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pattern matcher and the filesystem disagree about a match.
    #[error("error globbing {pattern}: {message}")]
    Pattern { pattern: String, message: String },

    /// Connection, timeout or DNS failure. No status code is available.
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// A well-formed response carried a failure status.
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    /// The driver does not implement this operation.
    #[error("{driver} driver does not support {operation}")]
    NotSupported {
        driver: String,
        operation: &'static str,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure is one a caller may reasonably reissue.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Result alias used throughout the driver crates.
pub type Result<T> = std::result::Result<T, Error>;
