//! Port contracts for the board context.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod export;
pub mod notifier;
pub mod renderer;
pub mod store;

pub use export::{ExportError, ExportSink};
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use renderer::{BoardRenderer, InsertionPreview, RenderError, RenderFrame};
pub use store::{BoardStore, BoardStoreError, BoardStoreResult};
