//! Pointer and touch state machines.

use super::{
    CancelReason, GestureConfig, GestureEvent, GestureId, GestureIdSource, InputEvent,
    InputInstant, InputModality, ItemRef, Point, ScheduledTasks, TouchId,
};
use crate::board::domain::ItemId;

/// Answers whether a release position lies over a drop zone.
///
/// Consulted on release to choose between `DragEnd` and `DragCancel`.
pub trait DropZoneProbe {
    /// Returns `true` when `point` would be accepted as a drop.
    fn accepts(&self, point: Point, modality: InputModality) -> bool;
}

impl<F> DropZoneProbe for F
where
    F: Fn(Point, InputModality) -> bool,
{
    fn accepts(&self, point: Point, modality: InputModality) -> bool {
        self(point, modality)
    }
}

/// Probe that accepts every release.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl DropZoneProbe for AcceptAll {
    fn accepts(&self, _point: Point, _modality: InputModality) -> bool {
        true
    }
}

/// Observable phase of one modality's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No gesture.
    Idle,
    /// A press is held but not yet classified.
    Pressed,
    /// A drag is in progress.
    Dragging,
}

#[derive(Debug, Clone, Copy)]
enum PointerState {
    Idle,
    Dragging { gesture: GestureId, item: ItemRef },
}

#[derive(Debug, Clone, Copy)]
enum TouchState {
    Idle,
    Pressed {
        gesture: GestureId,
        touch: TouchId,
        item: ItemRef,
        origin: Point,
    },
    Dragging {
        gesture: GestureId,
        touch: TouchId,
        item: ItemRef,
    },
}

impl TouchState {
    const fn touch(&self) -> Option<TouchId> {
        match self {
            Self::Idle => None,
            Self::Pressed { touch, .. } | Self::Dragging { touch, .. } => Some(*touch),
        }
    }
}

/// Converts raw input into the normalized gesture stream.
///
/// The pointer machine starts a drag on press; the touch machine waits for
/// the long-press deadline and abandons the press as a scroll once movement
/// exceeds the slop on either axis. A single touch contact is tracked;
/// additional fingers are ignored. Every path out of `Dragging` emits
/// exactly one `DragEnd` or `DragCancel`.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    ids: GestureIdSource,
    pointer: PointerState,
    touch: TouchState,
    long_press: ScheduledTasks<GestureId>,
}

impl GestureRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ids: GestureIdSource::default(),
            pointer: PointerState::Idle,
            touch: TouchState::Idle,
            long_press: ScheduledTasks::new(),
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns the pointer machine's phase.
    #[must_use]
    pub const fn pointer_phase(&self) -> GesturePhase {
        match self.pointer {
            PointerState::Idle => GesturePhase::Idle,
            PointerState::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    /// Returns the touch machine's phase.
    #[must_use]
    pub const fn touch_phase(&self) -> GesturePhase {
        match self.touch {
            TouchState::Idle => GesturePhase::Idle,
            TouchState::Pressed { .. } => GesturePhase::Pressed,
            TouchState::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    /// Returns `true` while a long-press deadline is pending.
    #[must_use]
    pub fn has_pending_long_press(&self) -> bool {
        !self.long_press.is_empty()
    }

    /// Feeds one input event, first firing any long-press deadline that
    /// elapsed by the event's time.
    pub fn handle(&mut self, event: &InputEvent, probe: &dyn DropZoneProbe) -> Vec<GestureEvent> {
        let mut out = self.advance(event.at());
        match *event {
            InputEvent::PointerDown {
                target, position, ..
            } => self.pointer_down(target, position, &mut out),
            InputEvent::PointerMove { position, .. } => {
                if let PointerState::Dragging { gesture, .. } = self.pointer {
                    out.push(GestureEvent::DragMove { gesture, position });
                }
            }
            InputEvent::PointerUp { position, .. } => {
                if let PointerState::Dragging { gesture, .. } = self.pointer {
                    self.pointer = PointerState::Idle;
                    out.push(release(gesture, position, InputModality::Pointer, probe));
                }
            }
            InputEvent::PointerCancel { .. } => {
                self.cancel_pointer(CancelReason::DeviceCancelled, &mut out);
            }
            InputEvent::TouchStart {
                touch,
                target,
                position,
                at,
            } => self.touch_start(touch, target, position, at, &mut out),
            InputEvent::TouchMove {
                touch, position, ..
            } => self.touch_move(touch, position, &mut out),
            InputEvent::TouchEnd {
                touch, position, ..
            } => self.touch_end(touch, position, probe, &mut out),
            InputEvent::TouchCancel { touch, .. } => {
                if self.touch.touch() == Some(touch) {
                    self.cancel_touch(CancelReason::DeviceCancelled, &mut out);
                }
            }
            InputEvent::Tick { .. } => {}
            InputEvent::ItemDetached { item, .. } => self.detach(item, &mut out),
            InputEvent::Interrupted { .. } => out.extend(self.interrupt()),
        }
        out
    }

    /// Fires long-press deadlines due at or before `now`.
    pub fn advance(&mut self, now: InputInstant) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        for due in self.long_press.take_due(now) {
            if let TouchState::Pressed {
                gesture,
                touch,
                item,
                ..
            } = self.touch
            {
                if gesture == due {
                    tracing::debug!(%gesture, item = %item.item, "long press recognized");
                    self.touch = TouchState::Dragging {
                        gesture,
                        touch,
                        item,
                    };
                    out.push(GestureEvent::DragStart {
                        gesture,
                        item,
                        modality: InputModality::Touch,
                    });
                }
            }
        }
        out
    }

    /// Cancels every active gesture and drops pending deadlines.
    ///
    /// Safe to call when idle; returns no events in that case.
    pub fn interrupt(&mut self) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.cancel_pointer(CancelReason::Interrupted, &mut out);
        self.cancel_touch(CancelReason::Interrupted, &mut out);
        self.long_press.clear();
        out
    }

    fn pointer_down(&mut self, target: Option<ItemRef>, position: Point, out: &mut Vec<GestureEvent>) {
        // A press while dragging means the release was lost.
        self.cancel_pointer(CancelReason::Interrupted, out);
        let Some(item) = target else {
            return;
        };
        let gesture = self.ids.next_id();
        tracing::debug!(%gesture, item = %item.item, x = position.x, y = position.y, "pointer drag started");
        self.pointer = PointerState::Dragging { gesture, item };
        out.push(GestureEvent::DragStart {
            gesture,
            item,
            modality: InputModality::Pointer,
        });
    }

    fn touch_start(
        &mut self,
        touch: TouchId,
        target: Option<ItemRef>,
        position: Point,
        at: InputInstant,
        out: &mut Vec<GestureEvent>,
    ) {
        match self.touch.touch() {
            None => {}
            // Same contact starting again: its end was lost.
            Some(tracked) if tracked == touch => {
                self.cancel_touch(CancelReason::Interrupted, out);
            }
            Some(_) => return,
        }
        let Some(item) = target else {
            return;
        };
        let gesture = self.ids.next_id();
        self.long_press
            .schedule(gesture, at.after(self.config.long_press_ms));
        self.touch = TouchState::Pressed {
            gesture,
            touch,
            item,
            origin: position,
        };
        tracing::debug!(%gesture, item = %item.item, "touch pressed");
    }

    fn touch_move(&mut self, touch: TouchId, position: Point, out: &mut Vec<GestureEvent>) {
        match self.touch {
            TouchState::Pressed {
                gesture,
                touch: tracked,
                origin,
                ..
            } if tracked == touch => {
                let slop = self.config.scroll_slop_px;
                if (position.x - origin.x).abs() > slop || (position.y - origin.y).abs() > slop {
                    self.long_press.cancel(gesture);
                    self.touch = TouchState::Idle;
                    tracing::debug!(%gesture, "touch reclassified as scroll");
                }
            }
            TouchState::Dragging {
                gesture,
                touch: tracked,
                ..
            } if tracked == touch => out.push(GestureEvent::DragMove { gesture, position }),
            TouchState::Idle | TouchState::Pressed { .. } | TouchState::Dragging { .. } => {}
        }
    }

    fn touch_end(
        &mut self,
        touch: TouchId,
        position: Point,
        probe: &dyn DropZoneProbe,
        out: &mut Vec<GestureEvent>,
    ) {
        match self.touch {
            TouchState::Pressed {
                gesture,
                touch: tracked,
                ..
            } if tracked == touch => {
                self.long_press.cancel(gesture);
                self.touch = TouchState::Idle;
                tracing::debug!(%gesture, "touch tap");
            }
            TouchState::Dragging {
                gesture,
                touch: tracked,
                ..
            } if tracked == touch => {
                self.touch = TouchState::Idle;
                out.push(release(gesture, position, InputModality::Touch, probe));
            }
            TouchState::Idle | TouchState::Pressed { .. } | TouchState::Dragging { .. } => {}
        }
    }

    fn detach(&mut self, detached: ItemId, out: &mut Vec<GestureEvent>) {
        if let PointerState::Dragging { item, .. } = self.pointer {
            if item.item == detached {
                self.cancel_pointer(CancelReason::ItemDetached, out);
            }
        }
        match self.touch {
            TouchState::Pressed { item, .. } | TouchState::Dragging { item, .. }
                if item.item == detached =>
            {
                self.cancel_touch(CancelReason::ItemDetached, out);
            }
            TouchState::Idle | TouchState::Pressed { .. } | TouchState::Dragging { .. } => {}
        }
    }

    fn cancel_pointer(&mut self, reason: CancelReason, out: &mut Vec<GestureEvent>) {
        if let PointerState::Dragging { gesture, .. } = self.pointer {
            tracing::debug!(%gesture, ?reason, "pointer drag cancelled");
            out.push(GestureEvent::DragCancel { gesture, reason });
        }
        self.pointer = PointerState::Idle;
    }

    fn cancel_touch(&mut self, reason: CancelReason, out: &mut Vec<GestureEvent>) {
        match self.touch {
            TouchState::Idle => {}
            TouchState::Pressed { gesture, .. } => {
                self.long_press.cancel(gesture);
            }
            TouchState::Dragging { gesture, .. } => {
                tracing::debug!(%gesture, ?reason, "touch drag cancelled");
                out.push(GestureEvent::DragCancel { gesture, reason });
            }
        }
        self.touch = TouchState::Idle;
    }
}

fn release(
    gesture: GestureId,
    position: Point,
    modality: InputModality,
    probe: &dyn DropZoneProbe,
) -> GestureEvent {
    if probe.accepts(position, modality) {
        GestureEvent::DragEnd { gesture, position }
    } else {
        tracing::debug!(%gesture, x = position.x, y = position.y, "released outside drop zones");
        GestureEvent::DragCancel {
            gesture,
            reason: CancelReason::ReleasedOutside,
        }
    }
}
