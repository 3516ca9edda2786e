//! Storage error handling
//!
//! Every failure that leaves the core is one of the variants below. Raw I/O
//! errors are classified at the point they happen so callers can tell a
//! missing record from a corrupted one from a failed write.

use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The kind of record an operation was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Draft,
    Published,
    HistoryEntry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Draft => "Draft",
            RecordKind::Published => "Published resume",
            RecordKind::HistoryEntry => "Draft history entry",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record does not exist, or the identifier used to find it is not a
    /// valid history id
    #[error("{0} not found")]
    NotFound(RecordKind),

    /// Persisted record exists but cannot be parsed
    #[error("Stored record at '{path}' is malformed: {details}")]
    Malformed { path: PathBuf, details: String },

    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The draft moved on since the caller read it
    #[error("Draft was modified concurrently: expected version {expected}, found {actual}")]
    Conflict {
        expected: DateTime<Utc>,
        actual: DateTime<Utc>,
    },
}

impl StoreError {
    /// Classify an I/O error raised while writing `path`
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => StoreError::DiskFull {
                path,
                source: error,
            },
            _ => StoreError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Classify an I/O error raised while reading `path`
    ///
    /// Absence is handled by the caller before this point, so a missing file
    /// here means it vanished mid-read and is reported as a read failure.
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            _ => StoreError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// True for the 404-equivalent case
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// True when the underlying storage did not accept a write
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            StoreError::CreateDirectory { .. }
                | StoreError::PermissionDenied { .. }
                | StoreError::DiskFull { .. }
                | StoreError::WriteError { .. }
                | StoreError::AtomicWriteFailed { .. }
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::DiskFull { .. }
                | StoreError::PermissionDenied { .. }
                | StoreError::Conflict { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::DiskFull { .. } => Some("Free up disk space and try again."),
            StoreError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::Malformed { .. } => {
                Some("The file was edited or damaged outside of folio. Restore it from a history entry or remove it.")
            }
            StoreError::Conflict { .. } => {
                Some("Reload the draft, reapply your changes and save again.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
