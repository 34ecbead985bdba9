//! Persistence port for the board blob.

use crate::board::snapshot::{SerializedBoard, SnapshotError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Durable key-value slot holding one serialized board.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Reads the stored board.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Corrupt`] when a blob exists but cannot be
    /// decoded, and [`BoardStoreError::Io`] when the slot cannot be read.
    async fn load(&self) -> BoardStoreResult<Option<SerializedBoard>>;

    /// Replaces the stored board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Io`] when the slot cannot be written.
    async fn save(&self, board: &SerializedBoard) -> BoardStoreResult<()>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The stored blob could not be decoded.
    #[error("stored board is corrupt: {0}")]
    Corrupt(#[from] SnapshotError),

    /// The underlying storage failed.
    #[error("board storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a storage error.
    #[must_use]
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
