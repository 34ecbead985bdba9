//! Rendered geometry of the board, as seen by the drop-target resolver.

use crate::board::{
    domain::{Board, ColumnId, ItemId},
    ports::InsertionPreview,
};
use crate::gesture::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What occupies a rendered slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderedEntry {
    /// A board item.
    Item(ItemId),
    /// The insertion preview marker.
    Placeholder,
}

/// One rendered slot in a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    /// Slot contents.
    pub entry: RenderedEntry,
    /// Screen bounds.
    pub bounds: Rect,
}

/// A rendered column and its slots, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedColumn {
    /// Column identity.
    pub column: ColumnId,
    /// Screen bounds of the drop zone.
    pub bounds: Rect,
    /// Slots in render order.
    pub items: Vec<RenderedItem>,
}

/// Snapshot of the rendered board used for hit testing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Columns in board order.
    pub columns: Vec<RenderedColumn>,
}

impl BoardLayout {
    /// Wraps rendered columns.
    #[must_use]
    pub const fn new(columns: Vec<RenderedColumn>) -> Self {
        Self { columns }
    }

    /// Returns the rendered column with `id`.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&RenderedColumn> {
        self.columns.iter().find(|column| column.column == id)
    }

    /// Returns the bounds of a rendered item.
    #[must_use]
    pub fn item_bounds(&self, item: ItemId) -> Option<Rect> {
        self.columns
            .iter()
            .flat_map(|column| column.items.iter())
            .find(|slot| slot.entry == RenderedEntry::Item(item))
            .map(|slot| slot.bounds)
    }

    /// Returns the centre of a rendered item.
    #[must_use]
    pub fn item_center(&self, item: ItemId) -> Option<Point> {
        self.item_bounds(item)
            .map(|bounds| Point::new(bounds.left + bounds.width / 2.0, bounds.mid_y()))
    }

    /// Returns the rendered position of the placeholder, if one is shown.
    #[must_use]
    pub fn placeholder(&self) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .items
                .iter()
                .position(|slot| slot.entry == RenderedEntry::Placeholder)
                .map(|index| (column.column, index))
        })
    }
}

/// Fixed-metric layout: equal-width columns side by side, equal-height
/// items stacked under a header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Top-left corner of the first column.
    pub origin: Point,
    /// Column width.
    pub column_width: f64,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Column height.
    pub column_height: f64,
    /// Space above the first item.
    pub header_height: f64,
    /// Item height.
    pub item_height: f64,
    /// Vertical gap between items.
    pub item_gap: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            column_width: 200.0,
            column_gap: 20.0,
            column_height: 800.0,
            header_height: 40.0,
            item_height: 60.0,
            item_gap: 10.0,
        }
    }
}

impl GridLayout {
    /// Lays out `board`, inserting a placeholder where `preview` points.
    ///
    /// The dragged item stays rendered in its source column; the
    /// placeholder index counts only the other items, matching how the
    /// resolver and [`Board::move_item`] count.
    #[must_use]
    pub fn layout(&self, board: &Board, preview: Option<&InsertionPreview>) -> BoardLayout {
        let mut left = self.origin.x;
        let mut columns = Vec::with_capacity(board.columns().len());
        for column in board.columns() {
            let mut entries: Vec<RenderedEntry> = column
                .items()
                .iter()
                .map(|item| RenderedEntry::Item(item.id()))
                .collect();
            if let Some(marker) = preview.filter(|marker| marker.column == column.id()) {
                insert_placeholder(&mut entries, marker);
            }

            let mut top = self.origin.y + self.header_height;
            let items = entries
                .into_iter()
                .map(|entry| {
                    let bounds = Rect::new(left, top, self.column_width, self.item_height);
                    top += self.item_height + self.item_gap;
                    RenderedItem { entry, bounds }
                })
                .collect();

            columns.push(RenderedColumn {
                column: column.id(),
                bounds: Rect::new(left, self.origin.y, self.column_width, self.column_height),
                items,
            });
            left += self.column_width + self.column_gap;
        }
        BoardLayout::new(columns)
    }
}

fn insert_placeholder(entries: &mut Vec<RenderedEntry>, marker: &InsertionPreview) {
    let dragged = RenderedEntry::Item(marker.item);
    let mut others = 0;
    let mut slot = entries.len();
    for (position, entry) in entries.iter().enumerate() {
        if *entry == dragged {
            continue;
        }
        if others == marker.index {
            slot = position;
            break;
        }
        others += 1;
    }
    entries.insert(slot, RenderedEntry::Placeholder);
}
