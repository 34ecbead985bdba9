//! Raw input events and the normalized gesture stream.

use super::Point;
use crate::board::domain::{ColumnId, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic input timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputInstant(u64);

impl InputInstant {
    /// Creates an instant from a millisecond count.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the millisecond count.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the instant `millis` later, saturating at the maximum.
    #[must_use]
    pub const fn after(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Identifier of one gesture, unique for the recognizer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureId(u64);

impl GestureId {
    /// Wraps a raw gesture number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw gesture number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Issues increasing gesture ids.
#[derive(Debug, Clone, Default)]
pub struct GestureIdSource {
    last: u64,
}

impl GestureIdSource {
    /// Returns the next id.
    pub const fn next_id(&mut self) -> GestureId {
        self.last = self.last.saturating_add(1);
        GestureId(self.last)
    }
}

/// Platform identifier of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u32);

/// Reference to a draggable item as rendered in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// Item under the input.
    pub item: ItemId,
    /// Column the item is rendered in.
    pub column: ColumnId,
}

/// Input device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputModality {
    /// Mouse or pen.
    Pointer,
    /// Finger on a touch screen.
    Touch,
}

/// A raw input sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer button pressed.
    PointerDown {
        /// Draggable item under the pointer, if any.
        #[serde(default)]
        target: Option<ItemRef>,
        /// Pointer position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// Pointer button released.
    PointerUp {
        /// Pointer position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// The platform abandoned the pointer interaction.
    PointerCancel {
        /// Event time.
        at: InputInstant,
    },
    /// A finger touched the screen.
    TouchStart {
        /// Contact identifier.
        touch: TouchId,
        /// Draggable item under the finger, if any.
        #[serde(default)]
        target: Option<ItemRef>,
        /// Contact position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// A finger moved.
    TouchMove {
        /// Contact identifier.
        touch: TouchId,
        /// Contact position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// A finger left the screen.
    TouchEnd {
        /// Contact identifier.
        touch: TouchId,
        /// Last contact position.
        position: Point,
        /// Event time.
        at: InputInstant,
    },
    /// The platform cancelled the touch sequence.
    TouchCancel {
        /// Contact identifier.
        touch: TouchId,
        /// Event time.
        at: InputInstant,
    },
    /// Time advanced with no input; lets scheduled tasks fire.
    Tick {
        /// Current time.
        at: InputInstant,
    },
    /// The rendered item was removed while a gesture may hold it.
    ItemDetached {
        /// Item that disappeared.
        item: ItemId,
        /// Event time.
        at: InputInstant,
    },
    /// The session lost input focus or visibility.
    Interrupted {
        /// Event time.
        at: InputInstant,
    },
}

impl InputEvent {
    /// Returns the event time.
    #[must_use]
    pub const fn at(&self) -> InputInstant {
        match self {
            Self::PointerDown { at, .. }
            | Self::PointerMove { at, .. }
            | Self::PointerUp { at, .. }
            | Self::PointerCancel { at }
            | Self::TouchStart { at, .. }
            | Self::TouchMove { at, .. }
            | Self::TouchEnd { at, .. }
            | Self::TouchCancel { at, .. }
            | Self::Tick { at }
            | Self::ItemDetached { at, .. }
            | Self::Interrupted { at } => *at,
        }
    }
}

/// Why a gesture ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Released outside every drop zone.
    ReleasedOutside,
    /// The input device reported the interaction lost.
    DeviceCancelled,
    /// The dragged item was removed mid-gesture.
    ItemDetached,
    /// A competing event or focus loss ended the gesture.
    Interrupted,
}

/// Normalized gesture stream consumed by the drag orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// A drag began on `item`.
    DragStart {
        /// Gesture identifier.
        gesture: GestureId,
        /// Item being dragged.
        item: ItemRef,
        /// Input family that started the drag.
        modality: InputModality,
    },
    /// The dragged item moved.
    DragMove {
        /// Gesture identifier.
        gesture: GestureId,
        /// Current position.
        position: Point,
    },
    /// The item was released over a drop zone.
    DragEnd {
        /// Gesture identifier.
        gesture: GestureId,
        /// Release position.
        position: Point,
    },
    /// The drag ended without a drop.
    DragCancel {
        /// Gesture identifier.
        gesture: GestureId,
        /// Cancellation cause.
        reason: CancelReason,
    },
}

impl GestureEvent {
    /// Returns the gesture this event belongs to.
    #[must_use]
    pub const fn gesture(&self) -> GestureId {
        match self {
            Self::DragStart { gesture, .. }
            | Self::DragMove { gesture, .. }
            | Self::DragEnd { gesture, .. }
            | Self::DragCancel { gesture, .. } => *gesture,
        }
    }
}
