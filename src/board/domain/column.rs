//! Column definitions and their item sequences.

use super::{ColumnId, Item, ItemId};
use serde::{Deserialize, Serialize};

/// Static definition of a column: identity, storage name and display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    id: ColumnId,
    name: String,
    title: String,
}

impl ColumnDefinition {
    /// Creates a column definition.
    #[must_use]
    pub fn new(id: ColumnId, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: title.into(),
        }
    }

    /// The five columns of the order-tracking board.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        [
            ("readyToPick", "Ready to Pick"),
            ("warehouse", "Warehouse"),
            ("built", "Built"),
            ("carrierBooked", "Carrier Booked"),
            ("readyPickup", "Ready for Pickup"),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (name, title))| Self::new(ColumnId::new(index), name, title))
        .collect()
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the storage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A column and the ordered items it currently owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    definition: ColumnDefinition,
    items: Vec<Item>,
}

impl Column {
    pub(crate) const fn new(definition: ColumnDefinition, items: Vec<Item>) -> Self {
        Self { definition, items }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.definition.id
    }

    /// Returns the column definition.
    #[must_use]
    pub const fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.definition.title()
    }

    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the column holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the index of an item within this column.
    #[must_use]
    pub fn position_of(&self, item: ItemId) -> Option<usize> {
        self.items.iter().position(|candidate| candidate.id() == item)
    }

    /// Returns the item with the given identifier, if present.
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&Item> {
        self.items.iter().find(|candidate| candidate.id() == item)
    }

    /// Returns item identifiers in display order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }
}
