//! Error types for combine-files.
//!
//! Every variant is terminal: the handler reports it as a single line and
//! exits with status 1.

mod context;

pub use context::IoOperation;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Specified directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Failed to delete existing output file {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Failed to {operation} {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },
}

impl CombineError {
    /// Create an I/O read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Read,
            source,
        }
    }

    /// Create an I/O write error.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Write,
            source,
        }
    }

    /// Errors raised while validating the run configuration, before any
    /// output is touched.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::DirectoryNotFound(_) | Self::CurrentDir(_))
    }
}

pub type Result<T> = std::result::Result<T, CombineError>;
