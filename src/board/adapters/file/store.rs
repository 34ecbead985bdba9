//! Board store backed by one JSON file.

use super::{open_or_create_dir, run_blocking};
use crate::board::{
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
    snapshot::SerializedBoard,
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

/// Stores the board as `<key>.json` inside a directory.
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileBoardStore {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
    temp_name: Utf8PathBuf,
}

impl FileBoardStore {
    /// Opens a store in `dir_path` using `key` as the file stem.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(dir_path: &Utf8Path, key: &str) -> io::Result<Self> {
        let dir = open_or_create_dir(dir_path)?;
        Ok(Self::from_dir(dir, key))
    }

    /// Wraps an already-open directory capability.
    #[must_use]
    pub fn from_dir(dir: Dir, key: &str) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: Utf8PathBuf::from(format!("{key}.json")),
            temp_name: Utf8PathBuf::from(format!(".{key}.json.tmp")),
        }
    }

    /// Returns the name of the board file within the directory.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }
}

#[async_trait]
impl BoardStore for FileBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<SerializedBoard>> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let contents = run_blocking(move || match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
        .map_err(BoardStoreError::io)?;

        contents
            .map(|raw| SerializedBoard::from_json_str(&raw).map_err(BoardStoreError::from))
            .transpose()
    }

    async fn save(&self, board: &SerializedBoard) -> BoardStoreResult<()> {
        let encoded = board.to_json()?;
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let temp_name = self.temp_name.clone();
        run_blocking(move || {
            dir.write(&temp_name, encoded.as_bytes())?;
            dir.rename(&temp_name, &dir, &file_name)
        })
        .await
        .map_err(BoardStoreError::io)
    }
}
