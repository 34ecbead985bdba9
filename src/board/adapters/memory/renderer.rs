//! Renderer that records frames instead of drawing them.

use crate::board::{
    domain::ItemId,
    ports::{BoardRenderer, InsertionPreview, RenderError, RenderFrame},
};
use std::sync::{Arc, Mutex, PoisonError};

/// Owned copy of what a frame showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    /// Item identifiers per column, in display order.
    pub columns: Vec<Vec<ItemId>>,
    /// Preview shown with the frame.
    pub preview: Option<InsertionPreview>,
}

/// Renderer that keeps every frame it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<RecordedFrame>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingRenderer {
    /// Creates a renderer with no recorded frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent renders fail (after recording the frame).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = failing;
    }

    /// Returns every recorded frame.
    #[must_use]
    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<RecordedFrame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl BoardRenderer for RecordingRenderer {
    fn render(&self, frame: &RenderFrame<'_>) -> Result<(), RenderError> {
        let recorded = RecordedFrame {
            columns: frame.columns.iter().map(|c| c.item_ids()).collect(),
            preview: frame.preview.copied(),
        };
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);

        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(RenderError("renderer configured to fail".to_owned()));
        }
        Ok(())
    }
}
