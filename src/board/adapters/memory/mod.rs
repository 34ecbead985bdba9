//! In-memory adapters.

mod notifier;
mod renderer;
mod store;

pub use notifier::RecordingNotifier;
pub use renderer::{RecordedFrame, RecordingRenderer};
pub use store::InMemoryBoardStore;
