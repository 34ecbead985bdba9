//! Board state and its persistence.
//!
//! The board context owns the fixed, ordered set of columns and the items
//! they hold. It follows the same hexagonal split as the rest of the crate:
//!
//! - Domain types and mutation rules in [`domain`]
//! - The durable serialized form in [`snapshot`]
//! - Port contracts for storage, rendering, notices and export in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod snapshot;
