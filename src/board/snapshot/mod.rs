//! Durable serialized form of the board.
//!
//! The blob keeps the shape the board has always been stored in:
//!
//! ```json
//! {
//!   "columns": [
//!     { "id": 0, "name": "readyToPick", "title": "Ready to Pick",
//!       "items": [{ "id": 1, "text": "Order 1042", "timestamp": 1760000000000 }] }
//!   ],
//!   "itemIdCounter": 1,
//!   "version": "2.0"
//! }
//! ```
//!
//! Older blobs are brought up to the current version by [`upgrade`] before
//! they are decoded.

mod error;
mod model;
pub mod upgrade;

pub use error::SnapshotError;
pub use model::{SerializedBoard, SerializedColumn, SerializedItem};
pub use upgrade::CURRENT_VERSION;
