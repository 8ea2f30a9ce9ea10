//! Error types for tracker operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by [`StatusTracker`](crate::StatusTracker) operations.
///
/// Absence of a record is not an error: read accessors return `Ok(None)`
/// for untracked jobs, missing records, and undecodable records alike.
/// Store connectivity failures and write-path encoding failures always
/// propagate -- the tracker performs no retries.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The underlying key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A status record could not be serialized on the write path.
    #[error("failed to encode status record: {0}")]
    Encode(#[from] serde_json::Error),
}
