//! In-memory board store.
//!
//! The slot holds the encoded JSON string rather than the typed value, so
//! every load exercises the same decode path as durable storage.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
    snapshot::SerializedBoard,
};

/// Thread-safe in-memory board slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    blob: Option<String>,
    saves: usize,
}

impl InMemoryBoardStore {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-populated with a raw blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut state) = store.state.write() {
            state.blob = Some(blob.into());
        }
        store
    }

    /// Returns the raw stored blob.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Io`] when lock acquisition fails.
    pub fn blob(&self) -> BoardStoreResult<Option<String>> {
        let state = self.state.read().map_err(|err| {
            BoardStoreError::io(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.blob.clone())
    }

    /// Returns how many saves have completed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Io`] when lock acquisition fails.
    pub fn save_count(&self) -> BoardStoreResult<usize> {
        let state = self.state.read().map_err(|err| {
            BoardStoreError::io(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.saves)
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<SerializedBoard>> {
        let blob = self.blob()?;
        blob.map(|raw| SerializedBoard::from_json_str(&raw).map_err(BoardStoreError::from))
            .transpose()
    }

    async fn save(&self, board: &SerializedBoard) -> BoardStoreResult<()> {
        let encoded = board.to_json()?;
        let mut state = self.state.write().map_err(|err| {
            BoardStoreError::io(std::io::Error::other(err.to_string()))
        })?;
        state.blob = Some(encoded);
        state.saves += 1;
        Ok(())
    }
}
