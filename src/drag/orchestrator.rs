//! The drag orchestrator state machine.

use super::{BoardLayout, DropTarget, DropTargetResolver};
use crate::board::{
    domain::{ColumnId, ItemId},
    ports::InsertionPreview,
};
use crate::gesture::{CancelReason, GestureEvent, GestureId, InputModality, ItemRef, Point};
use std::mem;

/// The drag currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Gesture that owns the drag.
    pub gesture: GestureId,
    /// Item being dragged.
    pub item: ItemId,
    /// Column the item was picked up from.
    pub source: ColumnId,
    /// Input family driving the drag.
    pub modality: InputModality,
}

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag.
    #[default]
    Idle,
    /// A drag is in flight with no valid target under it.
    Armed(ActiveDrag),
    /// A drag is in flight over a valid target.
    Previewing {
        /// The drag.
        drag: ActiveDrag,
        /// Where the item would land.
        preview: InsertionPreview,
    },
}

impl DragState {
    /// Returns the drag in flight, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Armed(drag) | Self::Previewing { drag, .. } => Some(drag),
        }
    }

    /// Returns the current insertion preview, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&InsertionPreview> {
        match self {
            Self::Previewing { preview, .. } => Some(preview),
            Self::Idle | Self::Armed(_) => None,
        }
    }
}

/// A move to commit to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Source column.
    pub from: ColumnId,
    /// Destination column.
    pub to: ColumnId,
    /// Item to move.
    pub item: ItemId,
    /// Destination index.
    pub index: usize,
}

/// What the caller must do after a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    /// Nothing changed.
    Ignored,
    /// A drag began; no board change yet.
    Armed(ActiveDrag),
    /// The insertion preview changed and must be re-rendered.
    PreviewChanged(Option<InsertionPreview>),
    /// The drag moved but the preview is the same.
    PreviewUnchanged,
    /// Commit this move exactly once.
    Commit(MoveRequest),
    /// The drag ended with no board change.
    Cancelled {
        /// Item that was being dragged.
        item: ItemId,
        /// Why the drag ended.
        reason: CancelReason,
        /// `true` when a preview was showing and must be cleared.
        cleared_preview: bool,
    },
}

/// Turns the gesture stream into previews and move requests.
///
/// Only one drag is tracked at a time: a `DragStart` while another drag is
/// in flight is ignored, as are events for any other gesture. The state is
/// reset to [`DragState::Idle`] before a drop is resolved, so a failure
/// further down cannot leave a drag half-finished.
#[derive(Debug, Clone)]
pub struct DragOrchestrator {
    resolver: DropTargetResolver,
    state: DragState,
}

impl DragOrchestrator {
    /// Creates an idle orchestrator.
    #[must_use]
    pub const fn new(resolver: DropTargetResolver) -> Self {
        Self {
            resolver,
            state: DragState::Idle,
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &DropTargetResolver {
        &self.resolver
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Applies one gesture event.
    pub fn handle(&mut self, event: &GestureEvent, layout: &BoardLayout) -> DragEffect {
        match *event {
            GestureEvent::DragStart {
                gesture,
                item,
                modality,
            } => self.start(gesture, item, modality),
            GestureEvent::DragMove { gesture, position } => match self.owned(gesture) {
                Some(drag) => self.hover(drag, position, layout),
                None => DragEffect::Ignored,
            },
            GestureEvent::DragEnd { gesture, position } => match self.owned(gesture) {
                Some(drag) => self.drop_at(drag, position, layout),
                None => DragEffect::Ignored,
            },
            GestureEvent::DragCancel { gesture, reason } => match self.owned(gesture) {
                Some(_) => self.cancel(reason),
                None => DragEffect::Ignored,
            },
        }
    }

    /// Cancels the drag in flight with [`CancelReason::Interrupted`].
    ///
    /// Idempotent: returns [`DragEffect::Ignored`] when idle.
    pub fn force_cancel(&mut self) -> DragEffect {
        self.cancel(CancelReason::Interrupted)
    }

    fn start(&mut self, gesture: GestureId, item: ItemRef, modality: InputModality) -> DragEffect {
        if let Some(active) = self.state.active() {
            tracing::debug!(
                %gesture,
                busy_with = %active.gesture,
                "drag start ignored; another drag in flight"
            );
            return DragEffect::Ignored;
        }
        let drag = ActiveDrag {
            gesture,
            item: item.item,
            source: item.column,
            modality,
        };
        tracing::debug!(%gesture, item = %drag.item, source = %drag.source, "drag armed");
        self.state = DragState::Armed(drag);
        DragEffect::Armed(drag)
    }

    fn hover(&mut self, drag: ActiveDrag, position: Point, layout: &BoardLayout) -> DragEffect {
        let target = self
            .resolver
            .resolve(layout, position, drag.modality, drag.item)
            .map(|target| preview_for(drag.item, target));
        if target.as_ref() == self.state.preview() {
            return DragEffect::PreviewUnchanged;
        }
        self.state = match target {
            Some(preview) => DragState::Previewing { drag, preview },
            None => DragState::Armed(drag),
        };
        tracing::debug!(gesture = %drag.gesture, ?target, "preview changed");
        DragEffect::PreviewChanged(target)
    }

    fn drop_at(&mut self, drag: ActiveDrag, position: Point, layout: &BoardLayout) -> DragEffect {
        let had_preview = mem::take(&mut self.state).preview().is_some();
        match self
            .resolver
            .resolve(layout, position, drag.modality, drag.item)
        {
            Some(target) => {
                let request = MoveRequest {
                    from: drag.source,
                    to: target.column,
                    item: drag.item,
                    index: target.index,
                };
                tracing::debug!(gesture = %drag.gesture, ?request, "drop resolved");
                DragEffect::Commit(request)
            }
            None => {
                tracing::debug!(gesture = %drag.gesture, "drop outside every column");
                DragEffect::Cancelled {
                    item: drag.item,
                    reason: CancelReason::ReleasedOutside,
                    cleared_preview: had_preview,
                }
            }
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> DragEffect {
        let previous = mem::take(&mut self.state);
        match previous.active() {
            Some(drag) => {
                tracing::debug!(gesture = %drag.gesture, ?reason, "drag cancelled");
                DragEffect::Cancelled {
                    item: drag.item,
                    reason,
                    cleared_preview: previous.preview().is_some(),
                }
            }
            None => DragEffect::Ignored,
        }
    }

    fn owned(&self, gesture: GestureId) -> Option<ActiveDrag> {
        self.state
            .active()
            .filter(|drag| drag.gesture == gesture)
            .copied()
    }
}

const fn preview_for(item: ItemId, target: DropTarget) -> InsertionPreview {
    InsertionPreview {
        item,
        column: target.column,
        index: target.index,
    }
}
