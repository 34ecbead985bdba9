//! Shared helpers for board flow integration tests.

use chrono::{DateTime, Utc};
use kanban_board::{
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{Board, ColumnDefinition, ColumnId, Item, ItemId},
        services::BoardService,
        snapshot::SerializedBoard,
    },
    clock::ManualClock,
    drag::{BoardLayout, GridLayout},
    gesture::{GestureConfig, InputEvent, InputInstant, ItemRef, Point},
    session::{BoardSession, SessionOutcome},
};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Boxed error used by flow tests.
pub type TestError = Box<dyn std::error::Error + Send + Sync>;

/// Session over the in-memory store.
pub type MemorySession = BoardSession<InMemoryBoardStore, ManualClock>;

/// 2024-05-01T09:00:00Z.
pub const START_MILLIS: i64 = 1_714_554_000_000;

/// Returns the instant every flow starts at.
#[must_use]
pub fn start() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(START_MILLIS).unwrap_or_default()
}

/// Builds a current-thread runtime for driving async calls.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// A live session over an in-memory store with a fixed grid layout.
pub struct Flow {
    /// Runtime driving async calls.
    pub rt: Runtime,
    /// Store behind the service.
    pub store: Arc<InMemoryBoardStore>,
    /// Clock stamping item timestamps.
    pub clock: Arc<ManualClock>,
    /// Session under test.
    pub session: MemorySession,
    /// Layout used to place items on screen.
    pub grid: GridLayout,
    now: u64,
}

impl Flow {
    /// Opens an empty board.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created.
    pub fn open() -> Result<Self, TestError> {
        let rt = runtime()?;
        let store = Arc::new(InMemoryBoardStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let service =
            rt.block_on(BoardService::builder(Arc::clone(&store), Arc::clone(&clock)).open());
        Ok(Self {
            rt,
            store,
            clock,
            session: BoardSession::new(Arc::new(service), GestureConfig::default()),
            grid: GridLayout::default(),
            now: 0,
        })
    }

    /// Adds items to a column in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the board refuses any item.
    pub fn seed(&self, column: usize, texts: &[&str]) -> Result<Vec<Item>, TestError> {
        let mut added = Vec::with_capacity(texts.len());
        for text in texts {
            let item = self
                .rt
                .block_on(self.session.service().add_item(ColumnId::new(column), text))?;
            added.push(item);
        }
        Ok(added)
    }

    /// Returns a copy of the live board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.rt.block_on(self.session.service().board())
    }

    /// Lays out the live board with the current preview.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        self.grid
            .layout(&self.board(), self.session.drag_state().preview())
    }

    /// Returns the texts of a column, top to bottom.
    #[must_use]
    pub fn texts(&self, column: usize) -> Vec<String> {
        self.board()
            .columns()
            .get(column)
            .map(|col| {
                col.items()
                    .iter()
                    .map(|item| item.text().as_str().to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns a drag target for `item` in `column`.
    #[must_use]
    pub const fn target(item: &Item, column: usize) -> ItemRef {
        ItemRef {
            item: item.id(),
            column: ColumnId::new(column),
        }
    }

    /// Returns the centre of a rendered item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not rendered.
    pub fn center(&self, item: ItemId) -> Result<Point, TestError> {
        self.layout()
            .item_center(item)
            .ok_or_else(|| TestError::from("item is not rendered"))
    }

    /// Returns a point `dy` pixels below the top of a column, horizontally
    /// centred.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not rendered.
    pub fn column_point(&self, column: usize, dy: f64) -> Result<Point, TestError> {
        let layout = self.layout();
        let bounds = layout
            .column(ColumnId::new(column))
            .ok_or("column is not rendered")?
            .bounds;
        Ok(Point::new(bounds.left + bounds.width / 2.0, bounds.top + dy))
    }

    /// Advances input time and returns the new instant.
    pub const fn tick(&mut self, millis: u64) -> InputInstant {
        self.now += millis;
        InputInstant::from_millis(self.now)
    }

    /// Feeds one input event against the current layout.
    pub fn feed(&mut self, input: &InputEvent) -> Vec<SessionOutcome> {
        let layout = self.layout();
        self.rt.block_on(self.session.handle_input(input, &layout))
    }

    /// Decodes the blob currently held by the store.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored or the blob does not decode.
    pub fn stored_board(&self) -> Result<Board, TestError> {
        let blob = self.store.blob()?.ok_or("nothing stored")?;
        let snapshot = SerializedBoard::from_json_str(&blob)?;
        Ok(snapshot.into_board(&ColumnDefinition::defaults())?)
    }
}
