//! Renderer port: projects board state onto the screen.

use crate::board::domain::{Column, ColumnId, Item, ItemId, format_relative_age};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transient marker showing where an in-flight item would land.
///
/// Never part of the committed board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsertionPreview {
    /// Item being dragged.
    pub item: ItemId,
    /// Column the item would be dropped into.
    pub column: ColumnId,
    /// Insertion index among the column's other items.
    pub index: usize,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Columns in board order.
    pub columns: &'a [Column],
    /// Active insertion preview, if a drag is hovering a column.
    pub preview: Option<&'a InsertionPreview>,
    /// Time the frame was produced, for relative item ages.
    pub rendered_at: DateTime<Utc>,
}

impl RenderFrame<'_> {
    /// Returns the display age of an item, e.g. `5m ago`.
    #[must_use]
    pub fn age_label(&self, item: &Item) -> String {
        format_relative_age(item.timestamp(), self.rendered_at)
    }

    /// Returns per-column item counts, as shown in column headers.
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        self.columns.iter().map(Column::len).collect()
    }
}

/// Error reported by a renderer. Rendering failures never abort a mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

/// Projection of board state; called after every committed mutation and on
/// every preview change.
pub trait BoardRenderer: Send + Sync {
    /// Draws a frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the frame could not be drawn.
    fn render(&self, frame: &RenderFrame<'_>) -> Result<(), RenderError>;
}
