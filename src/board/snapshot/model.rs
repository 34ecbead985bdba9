//! Serde model of the stored board blob.

use super::{SnapshotError, upgrade};
use crate::board::domain::{
    Board, ColumnDefinition, Item, ItemId, ItemText, PersistedBoardData, PersistedItemData,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized board: ordered columns with nested items, the id counter and
/// the schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedBoard {
    /// Columns in board order.
    pub columns: Vec<SerializedColumn>,
    /// Last item identifier handed out.
    pub item_id_counter: u64,
    /// Schema version of the blob.
    pub version: String,
}

/// Serialized column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedColumn {
    /// Column identifier.
    pub id: usize,
    /// Storage name.
    #[serde(default)]
    pub name: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<SerializedItem>,
}

/// Serialized item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedItem {
    /// Item identifier.
    pub id: u64,
    /// Item text.
    pub text: String,
    /// Last-modified time in epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SerializedBoard {
    /// Captures the current state of a board.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let columns = board
            .columns()
            .iter()
            .map(|column| SerializedColumn {
                id: column.id().value(),
                name: column.definition().name().to_owned(),
                title: column.title().to_owned(),
                items: column.items().iter().map(SerializedItem::from_item).collect(),
            })
            .collect();
        Self {
            columns,
            item_id_counter: board.item_id_counter(),
            version: upgrade::CURRENT_VERSION.to_owned(),
        }
    }

    /// Decodes a stored blob, upgrading older versions first.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the blob is not JSON, has an
    /// unsupported version, or does not match the board shape.
    pub fn from_json_str(blob: &str) -> Result<Self, SnapshotError> {
        let raw: serde_json::Value = serde_json::from_str(blob)?;
        let upgraded = upgrade::upgrade(raw)?;
        Ok(serde_json::from_value(upgraded)?)
    }

    /// Encodes the board as a compact JSON blob.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a board against the columns configured at startup.
    ///
    /// Column identity comes from `definitions`; the stored columns must
    /// carry exactly the same identifiers in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::ColumnMismatch`] when the stored columns do
    /// not line up, and [`SnapshotError::Domain`] for blank item text or
    /// duplicate identifiers.
    pub fn into_board(self, definitions: &[ColumnDefinition]) -> Result<Board, SnapshotError> {
        let expected: Vec<usize> = definitions.iter().map(|d| d.id().value()).collect();
        let found: Vec<usize> = self.columns.iter().map(|c| c.id).collect();
        if expected != found {
            return Err(SnapshotError::ColumnMismatch { expected, found });
        }

        let items = self
            .columns
            .into_iter()
            .map(|column| {
                column
                    .items
                    .into_iter()
                    .map(SerializedItem::into_item)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let board = Board::from_persisted(PersistedBoardData {
            definitions: definitions.to_vec(),
            items,
            item_id_counter: self.item_id_counter,
        })?;
        Ok(board)
    }

    /// Returns every item identifier in board order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<u64> {
        self.columns
            .iter()
            .flat_map(|column| column.items.iter().map(|item| item.id))
            .collect()
    }
}

impl SerializedItem {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id().value(),
            text: item.text().as_str().to_owned(),
            timestamp: item.timestamp(),
        }
    }

    fn into_item(self) -> Result<Item, SnapshotError> {
        let text = ItemText::new(self.text)?;
        Ok(Item::from_persisted(PersistedItemData {
            id: ItemId::new(self.id),
            text,
            timestamp: self.timestamp,
        }))
    }
}
