//! Drop-target resolution and the drag orchestrator.
//!
//! The orchestrator consumes the gesture stream, asks the resolver where a
//! drop would land, keeps the transient insertion preview, and emits a
//! single move request when a drag ends over a valid target. It never
//! touches board state itself; committing is the session's job.

mod layout;
mod orchestrator;
mod resolver;

pub use layout::{BoardLayout, GridLayout, RenderedColumn, RenderedEntry, RenderedItem};
pub use orchestrator::{ActiveDrag, DragEffect, DragOrchestrator, DragState, MoveRequest};
pub use resolver::{DropTarget, DropTargetResolver, ResolverProbe};
