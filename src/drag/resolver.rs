//! Maps a screen coordinate to a target column and insertion index.

use super::{BoardLayout, RenderedColumn, RenderedEntry};
use crate::board::domain::{ColumnId, ItemId};
use crate::gesture::{DropZoneProbe, GestureConfig, InputModality, Point};
use serde::{Deserialize, Serialize};

/// Where a drop would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropTarget {
    /// Destination column.
    pub column: ColumnId,
    /// Insertion index among the column's items, excluding the dragged one.
    pub index: usize,
}

/// Resolves drop targets from pointer geometry.
#[derive(Debug, Clone, Copy)]
pub struct DropTargetResolver {
    config: GestureConfig,
}

impl DropTargetResolver {
    /// Creates a resolver using the tolerances in `config`.
    #[must_use]
    pub const fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Returns the column whose bounds, grown by the modality's tolerance,
    /// contain `point`.
    ///
    /// When grown bounds overlap, the column nearest to `point` wins and an
    /// exact tie goes to the earlier column.
    #[must_use]
    pub fn column_at<'a>(
        &self,
        layout: &'a BoardLayout,
        point: Point,
        modality: InputModality,
    ) -> Option<&'a RenderedColumn> {
        let margin = self.config.tolerance(modality);
        let mut best: Option<(&RenderedColumn, f64)> = None;
        for column in &layout.columns {
            if !column.bounds.expanded(margin).contains(point) {
                continue;
            }
            let distance = column.bounds.distance_to(point);
            match best {
                Some((_, closest)) if closest <= distance => {}
                _ => best = Some((column, distance)),
            }
        }
        best.map(|(column, _)| column)
    }

    /// Resolves `point` to a drop target for `dragged`, or `None` when it is
    /// outside every column.
    ///
    /// The index is the position of the first rendered item, other than the
    /// dragged one and the placeholder, whose vertical midpoint is at or
    /// below `point`; a coordinate exactly on a midpoint inserts before that
    /// item. With no such item the index is the end of the list.
    #[must_use]
    pub fn resolve(
        &self,
        layout: &BoardLayout,
        point: Point,
        modality: InputModality,
        dragged: ItemId,
    ) -> Option<DropTarget> {
        let column = self.column_at(layout, point, modality)?;
        let candidates = column.items.iter().filter(|slot| match slot.entry {
            RenderedEntry::Item(item) => item != dragged,
            RenderedEntry::Placeholder => false,
        });
        let mut index = 0;
        for slot in candidates {
            if point.y <= slot.bounds.mid_y() {
                break;
            }
            index += 1;
        }
        tracing::trace!(column = %column.column, index, "drop target resolved");
        Some(DropTarget {
            column: column.column,
            index,
        })
    }

    /// Borrows the resolver as a [`DropZoneProbe`] over `layout`.
    #[must_use]
    pub const fn probe<'a>(&'a self, layout: &'a BoardLayout) -> ResolverProbe<'a> {
        ResolverProbe {
            resolver: self,
            layout,
        }
    }
}

/// [`DropZoneProbe`] backed by a resolver and a layout.
#[derive(Debug, Clone, Copy)]
pub struct ResolverProbe<'a> {
    resolver: &'a DropTargetResolver,
    layout: &'a BoardLayout,
}

impl DropZoneProbe for ResolverProbe<'_> {
    fn accepts(&self, point: Point, modality: InputModality) -> bool {
        self.resolver
            .column_at(self.layout, point, modality)
            .is_some()
    }
}
