//! Export sink port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Destination for exported board documents.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Writes an export under the given file name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Sink`] when the document cannot be written.
    async fn write(&self, file_name: &str, contents: &[u8]) -> Result<(), ExportError>;
}

/// Errors raised while producing or writing an export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// The export document could not be rendered.
    #[error("export rendering failed: {0}")]
    Render(String),

    /// The sink rejected the document.
    #[error("export sink error: {0}")]
    Sink(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExportError {
    /// Wraps a sink error.
    #[must_use]
    pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Sink(Arc::new(err))
    }
}
