//! Notifier port: short user-facing notices.

use crate::board::domain::ColumnId;
use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Confirmation of a completed action.
    Info,
    /// A recovered, non-fatal failure.
    Error,
}

/// User-facing notice raised by board services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An item was added.
    ItemAdded,
    /// An item was deleted.
    ItemDeleted,
    /// An item's text was changed.
    ItemEdited,
    /// An item was moved into a column.
    ItemMoved {
        /// Destination column.
        column: ColumnId,
        /// Destination column title.
        title: String,
    },
    /// Every column was emptied.
    BoardCleared,
    /// An export was produced.
    Exported {
        /// Name of the exported file.
        file_name: String,
    },
    /// Item text was blank and the action was refused.
    EmptyText,
    /// The operation referenced an item or column that no longer exists.
    StaleReference,
    /// A save failed; the in-memory board remains authoritative.
    SaveFailed,
    /// The stored board could not be loaded; a fresh board is in use.
    LoadFailed,
    /// An export could not be written.
    ExportFailed,
}

impl Notice {
    /// Returns the notice severity.
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::SaveFailed | Self::LoadFailed | Self::ExportFailed | Self::StaleReference => {
                NoticeLevel::Error
            }
            Self::ItemAdded
            | Self::ItemDeleted
            | Self::ItemEdited
            | Self::ItemMoved { .. }
            | Self::BoardCleared
            | Self::Exported { .. }
            | Self::EmptyText => NoticeLevel::Info,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemAdded => f.write_str("Order added successfully!"),
            Self::ItemDeleted => f.write_str("Order deleted"),
            Self::ItemEdited => f.write_str("Order updated"),
            Self::ItemMoved { title, .. } => write!(f, "Order moved to {title}"),
            Self::BoardCleared => f.write_str("Board cleared"),
            Self::Exported { .. } => f.write_str("Data exported successfully!"),
            Self::EmptyText => f.write_str("Order text cannot be empty"),
            Self::StaleReference => f.write_str("That order no longer exists"),
            Self::SaveFailed => f.write_str("Error saving data. Changes may be lost."),
            Self::LoadFailed => f.write_str("Error loading saved data. Starting fresh."),
            Self::ExportFailed => f.write_str("Error exporting data. Please try again."),
        }
    }
}

/// Receives notices; how they are shown is up to the adapter.
pub trait Notifier: Send + Sync {
    /// Shows a notice.
    fn notify(&self, notice: &Notice);
}
