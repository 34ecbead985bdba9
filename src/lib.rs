//! Kanban board with a cross-input drag-and-drop engine.
//!
//! A fixed set of ordered columns holds movable items. Items are
//! manipulated through direct commands (add, edit, delete, move, clear,
//! export) and through pointer or touch drags. Every committed change is
//! persisted through a storage port and projected through a renderer port.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: board rules with no infrastructure dependencies
//! - **Ports**: trait seams for storage, rendering, notices and export
//! - **Adapters**: in-memory, file-backed and logging implementations
//!
//! # Modules
//!
//! - [`board`]: board state, snapshots, persistence and commands
//! - [`gesture`]: pointer and touch gesture recognition
//! - [`drag`]: drop-target resolution and drag orchestration
//! - [`session`]: input pipeline from raw events to committed moves
//! - [`config`]: application configuration
//! - [`clock`]: manually driven clock for replays
//! - [`telemetry`]: tracing setup for binaries

pub mod board;
pub mod clock;
pub mod config;
pub mod drag;
pub mod gesture;
pub mod session;
pub mod telemetry;
