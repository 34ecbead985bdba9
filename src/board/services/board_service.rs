//! Board service: the single owner of mutable board state.

use super::{
    BoardCommand, CommandOutcome, ExportDocument, ExportOptions, persistence::PersistenceWriter,
    render_export,
};
use crate::board::{
    adapters::log::{LogNotifier, LogRenderer},
    domain::{Board, BoardDomainError, ColumnId, Item, ItemId, MoveReceipt},
    ports::{
        BoardRenderer, BoardStore, BoardStoreResult, ExportError, ExportSink, InsertionPreview,
        Notice, Notifier, RenderFrame,
    },
    snapshot::SerializedBoard,
};
use crate::config::BoardConfig;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Service-level errors for board operations.
///
/// Storage failures are deliberately absent: they are reported through the
/// notifier while the in-memory board stays authoritative.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The operation was refused by the board.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Export rendering or writing failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Owns the board behind a lock and applies every mutation, persisting and
/// re-rendering after each one.
///
/// The lock is held across the persistence write, so mutation and save are
/// mutually exclusive even when the service is shared between tasks.
pub struct BoardService<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    board: Mutex<Board>,
    writer: PersistenceWriter<S>,
    clock: Arc<C>,
    renderer: Arc<dyn BoardRenderer>,
    notifier: Arc<dyn Notifier>,
}

/// Builder that loads the stored board and assembles a [`BoardService`].
pub struct BoardServiceBuilder<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: BoardConfig,
    renderer: Arc<dyn BoardRenderer>,
    notifier: Arc<dyn Notifier>,
}

impl<S, C> BoardServiceBuilder<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    /// Starts a builder with default configuration and logging adapters.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            config: BoardConfig::default(),
            renderer: Arc::new(LogRenderer),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Sets the board configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn BoardRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Loads the stored board and returns the ready service.
    ///
    /// Startup never fails: an absent blob yields an empty board, and a
    /// corrupt or unreadable one yields an empty board plus a
    /// [`Notice::LoadFailed`].
    pub async fn open(self) -> BoardService<S, C> {
        let empty = Board::new(self.config.columns.clone()).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "configured columns rejected; using defaults");
            Board::with_default_columns()
        });
        let definitions = empty.definitions();

        let board = match self.store.load().await {
            Ok(None) => {
                tracing::debug!("no stored board; starting empty");
                empty
            }
            Ok(Some(snapshot)) => match snapshot.into_board(&definitions) {
                Ok(board) => {
                    tracing::info!(items = board.item_count(), "board loaded");
                    board
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored board rejected; starting fresh");
                    self.notifier.notify(&Notice::LoadFailed);
                    empty
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "board load failed; starting fresh");
                self.notifier.notify(&Notice::LoadFailed);
                empty
            }
        };

        let service = BoardService {
            board: Mutex::new(board),
            writer: PersistenceWriter::new(
                self.store,
                Arc::clone(&self.notifier),
                self.config.persistence,
            ),
            clock: self.clock,
            renderer: self.renderer,
            notifier: self.notifier,
        };
        {
            let guard = service.board.lock().await;
            service.render(&guard, None);
        }
        service
    }
}

impl<S, C> BoardService<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    /// Starts a [`BoardServiceBuilder`].
    #[must_use]
    pub fn builder(store: Arc<S>, clock: Arc<C>) -> BoardServiceBuilder<S, C> {
        BoardServiceBuilder::new(store, clock)
    }

    /// Appends an item to the end of a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the text is blank or the
    /// column is unknown; the board is unchanged.
    pub async fn add_item(&self, column: ColumnId, text: &str) -> BoardServiceResult<Item> {
        let mut board = self.board.lock().await;
        let item = board
            .add_item(column, text, &*self.clock)
            .map_err(|err| self.refuse(err))?;
        tracing::info!(item = %item.id(), %column, "item added");
        self.after_mutation(&board, Notice::ItemAdded).await;
        Ok(item)
    }

    /// Deletes an item. A missing item is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the column is unknown.
    pub async fn delete_item(
        &self,
        column: ColumnId,
        item: ItemId,
    ) -> BoardServiceResult<Option<Item>> {
        let mut board = self.board.lock().await;
        let removed = board
            .delete_item(column, item)
            .map_err(|err| self.refuse(err))?;
        match &removed {
            Some(_) => {
                tracing::info!(%item, %column, "item deleted");
                self.after_mutation(&board, Notice::ItemDeleted).await;
            }
            None => tracing::debug!(%item, %column, "delete ignored; item not in column"),
        }
        Ok(removed)
    }

    /// Replaces an item's text. A missing item is a no-op returning
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the text is blank or the
    /// column is unknown.
    pub async fn edit_item_text(
        &self,
        column: ColumnId,
        item: ItemId,
        text: &str,
    ) -> BoardServiceResult<Option<Item>> {
        let mut board = self.board.lock().await;
        let edited = board
            .edit_item_text(column, item, text, &*self.clock)
            .map_err(|err| self.refuse(err))?;
        match &edited {
            Some(_) => {
                tracing::info!(%item, %column, "item edited");
                self.after_mutation(&board, Notice::ItemEdited).await;
            }
            None => tracing::debug!(%item, %column, "edit ignored; item not in column"),
        }
        Ok(edited)
    }

    /// Moves an item to `index` of column `to` as one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when a column is unknown or the
    /// item is not in `from`; the board is unchanged.
    pub async fn move_item(
        &self,
        from: ColumnId,
        to: ColumnId,
        item: ItemId,
        index: usize,
    ) -> BoardServiceResult<MoveReceipt> {
        let mut board = self.board.lock().await;
        let receipt = board
            .move_item(from, to, item, index, &*self.clock)
            .map_err(|err| self.refuse(err))?;
        let title = board.column(to).map(|c| c.title().to_owned())?;
        tracing::info!(
            %item,
            %from,
            %to,
            index = receipt.to_index,
            "item moved"
        );
        self.after_mutation(&board, Notice::ItemMoved { column: to, title })
            .await;
        Ok(receipt)
    }

    /// Empties every column, returning the removed items.
    pub async fn clear(&self) -> Vec<Item> {
        let mut board = self.board.lock().await;
        let removed = board.clear();
        tracing::info!(removed = removed.len(), "board cleared");
        self.after_mutation(&board, Notice::BoardCleared).await;
        removed
    }

    /// Runs a tagged command.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub async fn dispatch(&self, command: BoardCommand) -> BoardServiceResult<CommandOutcome> {
        tracing::debug!(kind = ?command.kind(), "dispatching command");
        let outcome = match command {
            BoardCommand::AddItem { column, text } => {
                CommandOutcome::Added(self.add_item(column, &text).await?)
            }
            BoardCommand::DeleteItem { column, item } => {
                CommandOutcome::Deleted(self.delete_item(column, item).await?)
            }
            BoardCommand::EditItem { column, item, text } => {
                CommandOutcome::Edited(self.edit_item_text(column, item, &text).await?)
            }
            BoardCommand::MoveItem {
                from,
                to,
                item,
                index,
            } => CommandOutcome::Moved(self.move_item(from, to, item, index).await?),
            BoardCommand::ClearBoard => CommandOutcome::Cleared(self.clear().await),
            BoardCommand::Export { options } => CommandOutcome::Exported(self.export(&options).await?),
        };
        Ok(outcome)
    }

    /// Redraws the board with an insertion preview (or without one).
    pub async fn render_preview(&self, preview: Option<&InsertionPreview>) {
        let board = self.board.lock().await;
        self.render(&board, preview);
    }

    /// Returns a copy of the current board.
    pub async fn board(&self) -> Board {
        self.board.lock().await.clone()
    }

    /// Returns the serialized form of the current board.
    pub async fn snapshot(&self) -> SerializedBoard {
        SerializedBoard::from_board(&*self.board.lock().await)
    }

    /// Writes the current board immediately, superseding any pending
    /// debounced write. Called on visibility changes and unload.
    ///
    /// # Errors
    ///
    /// Returns the store error; it has already been reported as a notice.
    pub async fn flush(&self) -> BoardStoreResult<()> {
        let board = self.board.lock().await;
        self.writer.flush(&SerializedBoard::from_board(&board)).await
    }

    /// Returns `true` while a debounced write is waiting to run.
    #[must_use]
    pub fn has_pending_write(&self) -> bool {
        self.writer.has_pending()
    }

    /// Renders an export document without touching live state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Export`] when rendering fails.
    pub async fn export(&self, options: &ExportOptions) -> BoardServiceResult<ExportDocument> {
        let board = self.board.lock().await;
        Ok(render_export(&board, options, self.clock.utc())?)
    }

    /// Renders an export and writes it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Export`] when rendering or writing fails.
    pub async fn export_to(
        &self,
        options: &ExportOptions,
        sink: &dyn ExportSink,
    ) -> BoardServiceResult<ExportDocument> {
        let document = self.export(options).await?;
        match sink
            .write(&document.file_name, document.contents.as_bytes())
            .await
        {
            Ok(()) => {
                tracing::info!(file = %document.file_name, "board exported");
                self.notifier.notify(&Notice::Exported {
                    file_name: document.file_name.clone(),
                });
                Ok(document)
            }
            Err(err) => {
                tracing::warn!(error = %err, "board export failed");
                self.notifier.notify(&Notice::ExportFailed);
                Err(err.into())
            }
        }
    }

    async fn after_mutation(&self, board: &Board, notice: Notice) {
        self.writer.request(SerializedBoard::from_board(board)).await;
        self.render(board, None);
        self.notifier.notify(&notice);
    }

    fn render(&self, board: &Board, preview: Option<&InsertionPreview>) {
        let frame = RenderFrame {
            columns: board.columns(),
            preview,
            rendered_at: self.clock.utc(),
        };
        if let Err(err) = self.renderer.render(&frame) {
            tracing::warn!(error = %err, "render failed");
        }
    }

    fn refuse(&self, err: BoardDomainError) -> BoardServiceError {
        if err.is_validation() {
            tracing::debug!(error = %err, "operation refused");
            self.notifier.notify(&Notice::EmptyText);
        } else if err.is_not_found() {
            tracing::warn!(error = %err, "stale reference");
            self.notifier.notify(&Notice::StaleReference);
        } else {
            tracing::warn!(error = %err, "operation refused");
        }
        err.into()
    }
}
