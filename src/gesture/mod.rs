//! Gesture recognition for pointer and touch input.
//!
//! Raw input samples go in, a normalized gesture stream comes out:
//! `DragStart`, `DragMove`, `DragEnd` and `DragCancel`. Each modality runs
//! its own state machine (`Idle → Pressed → Dragging | Idle`); the touch
//! machine disambiguates tap, scroll and long-press using a cancellable
//! scheduled task keyed by gesture id.
//!
//! Time is supplied by the caller on every event, so the recognizer never
//! sleeps and is fully deterministic under test.

mod config;
mod event;
mod geometry;
mod recognizer;
mod schedule;

pub use config::GestureConfig;
pub use event::{
    CancelReason, GestureEvent, GestureId, GestureIdSource, InputEvent, InputInstant,
    InputModality, ItemRef, TouchId,
};
pub use geometry::{Point, Rect};
pub use recognizer::{AcceptAll, DropZoneProbe, GesturePhase, GestureRecognizer};
pub use schedule::ScheduledTasks;
