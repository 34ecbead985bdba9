//! Board aggregate root: the fixed column set and the item-id counter.

use super::{BoardDomainError, Column, ColumnDefinition, ColumnId, Item, ItemId, ItemText};
use mockable::Clock;
use std::collections::HashSet;

/// The board state store.
///
/// All mutations go through `&mut self`, so no observer can see an item in
/// zero or two columns: a move removes and reinserts within one call after
/// every precondition has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
    item_id_counter: u64,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Column definitions in board order.
    pub definitions: Vec<ColumnDefinition>,
    /// Items per column, parallel to `definitions`.
    pub items: Vec<Vec<Item>>,
    /// Last identifier handed out.
    pub item_id_counter: u64,
}

/// Summary of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReceipt {
    /// Item that moved.
    pub item: ItemId,
    /// Column the item left.
    pub from: ColumnId,
    /// Index the item occupied in the source column.
    pub from_index: usize,
    /// Column the item now belongs to.
    pub to: ColumnId,
    /// Index the item now occupies, after clamping.
    pub to_index: usize,
}

impl Board {
    /// Creates an empty board from column definitions.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnLayout`] when there are no
    /// columns or their identifiers are not `0..N` in order.
    pub fn new(definitions: Vec<ColumnDefinition>) -> Result<Self, BoardDomainError> {
        validate_layout(&definitions)?;
        let columns = definitions
            .into_iter()
            .map(|definition| Column::new(definition, Vec::new()))
            .collect();
        Ok(Self {
            columns,
            item_id_counter: 0,
        })
    }

    /// Creates an empty board with the default five columns.
    #[must_use]
    pub fn with_default_columns() -> Self {
        let columns = ColumnDefinition::defaults()
            .into_iter()
            .map(|definition| Column::new(definition, Vec::new()))
            .collect();
        Self {
            columns,
            item_id_counter: 0,
        }
    }

    /// Reconstructs a board from persisted storage.
    ///
    /// A counter lower than the highest stored identifier is raised to it so
    /// that no identifier can ever be issued twice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnLayout`] when the definitions
    /// are invalid or the item lists do not line up with them, and
    /// [`BoardDomainError::DuplicateItem`] when an identifier repeats.
    pub fn from_persisted(data: PersistedBoardData) -> Result<Self, BoardDomainError> {
        validate_layout(&data.definitions)?;
        if data.items.len() != data.definitions.len() {
            return Err(BoardDomainError::InvalidColumnLayout(format!(
                "expected {} item lists, found {}",
                data.definitions.len(),
                data.items.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut highest = 0;
        for item in data.items.iter().flatten() {
            if !seen.insert(item.id()) {
                return Err(BoardDomainError::DuplicateItem(item.id()));
            }
            highest = highest.max(item.id().value());
        }

        let columns = data
            .definitions
            .into_iter()
            .zip(data.items)
            .map(|(definition, items)| Column::new(definition, items))
            .collect();
        Ok(Self {
            columns,
            item_id_counter: data.item_id_counter.max(highest),
        })
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column definitions in board order.
    #[must_use]
    pub fn definitions(&self) -> Vec<ColumnDefinition> {
        self.columns
            .iter()
            .map(|column| column.definition().clone())
            .collect()
    }

    /// Returns a column by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for unknown identifiers.
    pub fn column(&self, id: ColumnId) -> Result<&Column, BoardDomainError> {
        self.columns
            .get(id.value())
            .ok_or(BoardDomainError::ColumnNotFound(id))
    }

    /// Returns the last identifier handed out.
    #[must_use]
    pub const fn item_id_counter(&self) -> u64 {
        self.item_id_counter
    }

    /// Returns the number of items across all columns.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Finds an item anywhere on the board, returning its column and index.
    #[must_use]
    pub fn locate(&self, item: ItemId) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(item)
                .map(|index| (column.id(), index))
        })
    }

    /// Appends a new item to the end of a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyItemText`] when the text is blank and
    /// [`BoardDomainError::ColumnNotFound`] for unknown columns, and
    /// [`BoardDomainError::ItemIdsExhausted`] once the counter is at its
    /// maximum. The counter is untouched on failure.
    pub fn add_item(
        &mut self,
        column: ColumnId,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Item, BoardDomainError> {
        let text = ItemText::new(text)?;
        let next_id = self
            .item_id_counter
            .checked_add(1)
            .ok_or(BoardDomainError::ItemIdsExhausted)?;
        let target = self.column_mut(column)?;
        let item = Item::new(ItemId::new(next_id), text, clock);
        target.items_mut().push(item.clone());
        self.item_id_counter = next_id;
        Ok(item)
    }

    /// Removes an item from a column.
    ///
    /// Returns `Ok(None)` when the item is not in that column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for unknown columns.
    pub fn delete_item(
        &mut self,
        column: ColumnId,
        item: ItemId,
    ) -> Result<Option<Item>, BoardDomainError> {
        let target = self.column_mut(column)?;
        let removed = target
            .position_of(item)
            .map(|index| target.items_mut().remove(index));
        Ok(removed)
    }

    /// Moves an item to `target_index` of another (or the same) column.
    ///
    /// The index is clamped to `0..=len` of the destination after the item
    /// has left its source, and the item's timestamp is restamped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when either column is
    /// unknown and [`BoardDomainError::ItemNotFound`] when the item is not in
    /// the source column. The board is unchanged on error.
    pub fn move_item(
        &mut self,
        from: ColumnId,
        to: ColumnId,
        item: ItemId,
        target_index: usize,
        clock: &impl Clock,
    ) -> Result<MoveReceipt, BoardDomainError> {
        self.column(to)?;
        let from_index = self
            .column(from)?
            .position_of(item)
            .ok_or(BoardDomainError::ItemNotFound { column: from, item })?;

        let mut moving = self.column_mut(from)?.items_mut().remove(from_index);
        moving.touch(clock);

        let destination = self.column_mut(to)?.items_mut();
        let to_index = target_index.min(destination.len());
        destination.insert(to_index, moving);

        Ok(MoveReceipt {
            item,
            from,
            from_index,
            to,
            to_index,
        })
    }

    /// Replaces an item's text.
    ///
    /// Returns `Ok(None)` when the item is not in that column, whatever the
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for unknown columns and
    /// [`BoardDomainError::EmptyItemText`] when the item exists but the text
    /// is blank.
    pub fn edit_item_text(
        &mut self,
        column: ColumnId,
        item: ItemId,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Option<Item>, BoardDomainError> {
        let target = self.column_mut(column)?;
        let Some(found) = target
            .items_mut()
            .iter_mut()
            .find(|candidate| candidate.id() == item)
        else {
            return Ok(None);
        };
        found.set_text(ItemText::new(text)?, clock);
        Ok(Some(found.clone()))
    }

    /// Empties every column. Definitions and the id counter are kept.
    ///
    /// Returns the removed items.
    pub fn clear(&mut self) -> Vec<Item> {
        self.columns
            .iter_mut()
            .flat_map(|column| std::mem::take(column.items_mut()))
            .collect()
    }

    fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column, BoardDomainError> {
        self.columns
            .get_mut(id.value())
            .ok_or(BoardDomainError::ColumnNotFound(id))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_default_columns()
    }
}

fn validate_layout(definitions: &[ColumnDefinition]) -> Result<(), BoardDomainError> {
    if definitions.is_empty() {
        return Err(BoardDomainError::InvalidColumnLayout(
            "a board needs at least one column".to_owned(),
        ));
    }
    for (index, definition) in definitions.iter().enumerate() {
        if definition.id().value() != index {
            return Err(BoardDomainError::InvalidColumnLayout(format!(
                "column '{}' has id {} at position {index}",
                definition.name(),
                definition.id()
            )));
        }
    }
    Ok(())
}
