//! Errors raised while decoding or restoring serialized boards.

use crate::board::domain::BoardDomainError;
use thiserror::Error;

/// Errors returned when a serialized board cannot be restored.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The blob is not valid JSON or does not match the expected shape.
    #[error("malformed board snapshot: {0}")]
    Malformed(String),

    /// The blob declares a version this build cannot read.
    #[error("unsupported board snapshot version: {0}")]
    UnsupportedVersion(String),

    /// The stored columns do not line up with the configured columns.
    #[error("stored columns {found:?} do not match configured columns {expected:?}")]
    ColumnMismatch {
        /// Column identifiers configured at startup.
        expected: Vec<usize>,
        /// Column identifiers found in the blob.
        found: Vec<usize>,
    },

    /// The stored data violates a board invariant.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}

impl SnapshotError {
    /// Creates a malformed-snapshot error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
