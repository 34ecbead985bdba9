//! Error types for board domain validation and mutation.

use super::{ColumnId, ItemId};
use thiserror::Error;

/// Errors returned while validating or mutating the board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// Item text is empty after trimming.
    #[error("item text must not be empty")]
    EmptyItemText,

    /// The column identifier does not name a column on this board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The item is not present in the referenced column.
    #[error("item {item} not found in column {column}")]
    ItemNotFound {
        /// Column that was searched.
        column: ColumnId,
        /// Item that was expected.
        item: ItemId,
    },

    /// The same item identifier appears more than once.
    #[error("duplicate item identifier: {0}")]
    DuplicateItem(ItemId),

    /// The id counter is at its maximum; no further item can be created.
    #[error("item identifiers exhausted")]
    ItemIdsExhausted,

    /// Column definitions are not a dense, ordered `0..N` sequence.
    #[error("invalid column layout: {0}")]
    InvalidColumnLayout(String),
}

impl BoardDomainError {
    /// Returns `true` for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyItemText)
    }

    /// Returns `true` when a stale or missing reference was used.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_) | Self::ItemNotFound { .. })
    }
}
