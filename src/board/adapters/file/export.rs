//! Export sink writing documents into a directory.

use super::{open_or_create_dir, run_blocking};
use crate::board::ports::{ExportError, ExportSink};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

/// Writes each export as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirExportSink {
    dir: Arc<Dir>,
}

impl DirExportSink {
    /// Opens (creating if necessary) the export directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(dir_path: &Utf8Path) -> io::Result<Self> {
        Ok(Self {
            dir: Arc::new(open_or_create_dir(dir_path)?),
        })
    }
}

#[async_trait]
impl ExportSink for DirExportSink {
    async fn write(&self, file_name: &str, contents: &[u8]) -> Result<(), ExportError> {
        if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(ExportError::sink(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing export file name '{file_name}'"),
            )));
        }
        let dir = Arc::clone(&self.dir);
        let name = file_name.to_owned();
        let bytes = contents.to_vec();
        run_blocking(move || dir.write(&name, bytes))
            .await
            .map_err(ExportError::sink)
    }
}
