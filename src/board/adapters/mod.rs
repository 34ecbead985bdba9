//! Adapter implementations of the board ports.
//!
//! - [`memory`]: in-process adapters for tests and embedding
//! - [`file`]: capability-scoped filesystem store and export sink
//! - [`log`]: adapters that report through `tracing`

pub mod file;
pub mod log;
pub mod memory;
