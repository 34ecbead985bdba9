//! Tagged command set for direct board manipulation.

use super::{ExportDocument, ExportOptions};
use crate::board::domain::{ColumnId, Item, ItemId, MoveReceipt};
use serde::{Deserialize, Serialize};

/// A direct board command, as issued by form controls and buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardCommand {
    /// Append a new item to a column.
    AddItem {
        /// Target column.
        column: ColumnId,
        /// Item text; must not be blank.
        text: String,
    },
    /// Delete an item.
    DeleteItem {
        /// Column holding the item.
        column: ColumnId,
        /// Item to delete.
        item: ItemId,
    },
    /// Replace an item's text.
    EditItem {
        /// Column holding the item.
        column: ColumnId,
        /// Item to edit.
        item: ItemId,
        /// New text; must not be blank.
        text: String,
    },
    /// Move an item to an index of a column.
    MoveItem {
        /// Source column.
        from: ColumnId,
        /// Destination column.
        to: ColumnId,
        /// Item to move.
        item: ItemId,
        /// Destination index; clamped to the column length.
        index: usize,
    },
    /// Empty every column.
    ClearBoard,
    /// Produce an export document.
    Export {
        /// Export settings.
        #[serde(default)]
        options: ExportOptions,
    },
}

/// Discriminant of a [`BoardCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// [`BoardCommand::AddItem`].
    AddItem,
    /// [`BoardCommand::DeleteItem`].
    DeleteItem,
    /// [`BoardCommand::EditItem`].
    EditItem,
    /// [`BoardCommand::MoveItem`].
    MoveItem,
    /// [`BoardCommand::ClearBoard`].
    ClearBoard,
    /// [`BoardCommand::Export`].
    Export,
}

impl BoardCommand {
    /// Returns the command discriminant.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::AddItem { .. } => CommandKind::AddItem,
            Self::DeleteItem { .. } => CommandKind::DeleteItem,
            Self::EditItem { .. } => CommandKind::EditItem,
            Self::MoveItem { .. } => CommandKind::MoveItem,
            Self::ClearBoard => CommandKind::ClearBoard,
            Self::Export { .. } => CommandKind::Export,
        }
    }

    /// Returns `true` when running the command could take `item` off the
    /// board or out of its current slot.
    #[must_use]
    pub fn displaces(&self, item: ItemId) -> bool {
        match self {
            Self::DeleteItem { item: target, .. } | Self::MoveItem { item: target, .. } => {
                *target == item
            }
            Self::ClearBoard => true,
            Self::AddItem { .. } | Self::EditItem { .. } | Self::Export { .. } => false,
        }
    }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The new item.
    Added(Item),
    /// The deleted item, or `None` when it was already gone.
    Deleted(Option<Item>),
    /// The edited item, or `None` when it was not found.
    Edited(Option<Item>),
    /// The committed move.
    Moved(MoveReceipt),
    /// Items removed by the clear.
    Cleared(Vec<Item>),
    /// The export document.
    Exported(ExportDocument),
}
