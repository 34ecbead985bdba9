//! Adapters that report through `tracing` instead of a UI.

use crate::board::ports::{
    BoardRenderer, Notice, NoticeLevel, Notifier, RenderError, RenderFrame,
};

/// Notifier that logs notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level() {
            NoticeLevel::Info => tracing::info!(%notice, "notice"),
            NoticeLevel::Error => tracing::warn!(%notice, "notice"),
        }
    }
}

/// Renderer that logs a one-line summary per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl BoardRenderer for LogRenderer {
    fn render(&self, frame: &RenderFrame<'_>) -> Result<(), RenderError> {
        tracing::debug!(counts = ?frame.counts(), preview = ?frame.preview, "frame");
        Ok(())
    }
}
