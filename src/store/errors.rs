//! Store error taxonomy
//!
//! Three failure classes cover every store operation:
//! - `StorageUnavailable`: the durable file is missing, unreadable, or
//!   unwritable. The operation aborts with no partial state change.
//! - `CorruptData`: the blob cannot be decoded. Surfaced with a byte
//!   offset; never auto-repaired.
//! - `NotFound`: the requested id is absent. `find_by_id` reports this
//!   as `None` instead; only `remove` fails explicitly.
//!
//! Validation failures are not errors. They are ordinary control flow
//! carried by `ValidationResult` (see `contact::validate`).
//!
//! None of these are retried: there is no transient-fault assumption.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by store load/save/remove.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Durable file missing, unreadable, or unwritable
    #[error("store file unavailable: {path}: {source}")]
    StorageUnavailable {
        /// Path of the file the operation touched
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Durable content cannot be decoded
    #[error("corrupt store data at byte {offset}: {reason}")]
    CorruptData {
        /// Byte offset where decoding failed
        offset: u64,
        /// What was wrong at that offset
        reason: String,
    },

    /// No contact carries the requested id
    #[error("no contact with id {id}")]
    NotFound {
        /// The id that was requested
        id: u64,
    },
}

impl StoreError {
    /// Shorthand for an unavailable-file error.
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a corruption error with byte-offset context.
    pub fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        Self::CorruptData {
            offset,
            reason: reason.into(),
        }
    }
}
