//! Domain model for the board state store.
//!
//! Columns are defined once at startup and never change identity or order.
//! Items move between them; every item belongs to exactly one column.

mod board;
mod column;
mod error;
mod ids;
mod item;

pub use board::{Board, MoveReceipt, PersistedBoardData};
pub use column::{Column, ColumnDefinition};
pub use error::BoardDomainError;
pub use ids::{ColumnId, ItemId};
pub use item::{Item, ItemText, PersistedItemData, format_relative_age};
