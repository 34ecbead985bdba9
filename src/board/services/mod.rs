//! Application services for the board.

mod board_service;
mod command;
mod export;
mod persistence;

pub use board_service::{BoardService, BoardServiceBuilder, BoardServiceError, BoardServiceResult};
pub use command::{BoardCommand, CommandKind, CommandOutcome};
pub use export::{ExportDocument, ExportFormat, ExportOptions, render_export};
