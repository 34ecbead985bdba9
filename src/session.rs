//! Input session: wires raw input through gesture recognition and drag
//! orchestration into the board service.
//!
//! ```text
//! InputEvent → GestureRecognizer → DragOrchestrator → (resolve) → BoardService
//! ```
//!
//! The session is the only caller that commits drags, and it does so with a
//! single `move_item` per drop. Direct commands pass through
//! [`BoardSession::dispatch`] so that a command removing the dragged item
//! cancels the drag first.

use crate::board::{
    domain::{ItemId, MoveReceipt},
    ports::{BoardStore, InsertionPreview},
    services::{BoardCommand, BoardService, BoardServiceResult, CommandOutcome},
};
use crate::drag::{
    ActiveDrag, BoardLayout, DragEffect, DragOrchestrator, DragState, DropTargetResolver,
    MoveRequest,
};
use crate::gesture::{CancelReason, GestureConfig, GestureRecognizer, InputEvent};
use mockable::Clock;
use std::sync::Arc;

/// Observable result of feeding input to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A drag began.
    DragStarted(ActiveDrag),
    /// The insertion preview changed.
    PreviewChanged(Option<InsertionPreview>),
    /// A drop was committed to the board.
    Moved(MoveReceipt),
    /// A drop was resolved but the board refused the move.
    MoveRejected(MoveRequest),
    /// A drag ended without changing the board.
    DragCancelled {
        /// Item that was being dragged.
        item: ItemId,
        /// Why the drag ended.
        reason: CancelReason,
    },
}

/// One interactive session over a shared board service.
pub struct BoardSession<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    service: Arc<BoardService<S, C>>,
    recognizer: GestureRecognizer,
    orchestrator: DragOrchestrator,
}

impl<S, C> BoardSession<S, C>
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync,
{
    /// Creates an idle session.
    #[must_use]
    pub fn new(service: Arc<BoardService<S, C>>, config: GestureConfig) -> Self {
        Self {
            service,
            recognizer: GestureRecognizer::new(config),
            orchestrator: DragOrchestrator::new(DropTargetResolver::new(config)),
        }
    }

    /// Returns the board service.
    #[must_use]
    pub const fn service(&self) -> &Arc<BoardService<S, C>> {
        &self.service
    }

    /// Returns the drag state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.orchestrator.state()
    }

    /// Returns the gesture recognizer.
    #[must_use]
    pub const fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Feeds one raw input event against the current rendered `layout`.
    pub async fn handle_input(
        &mut self,
        input: &InputEvent,
        layout: &BoardLayout,
    ) -> Vec<SessionOutcome> {
        let gestures = {
            let probe = self.orchestrator.resolver().probe(layout);
            self.recognizer.handle(input, &probe)
        };
        let mut outcomes = Vec::with_capacity(gestures.len());
        for gesture in &gestures {
            let effect = self.orchestrator.handle(gesture, layout);
            outcomes.extend(self.apply(effect).await);
        }
        outcomes
    }

    /// Runs a board command, first cancelling the drag in flight when the
    /// command would remove or relocate the dragged item.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying board operation.
    pub async fn dispatch(&mut self, command: BoardCommand) -> BoardServiceResult<CommandOutcome> {
        let displaced = self
            .orchestrator
            .state()
            .active()
            .is_some_and(|drag| command.displaces(drag.item));
        if displaced {
            tracing::debug!(kind = ?command.kind(), "command displaces dragged item");
            self.cancel_drag().await;
        }
        self.service.dispatch(command).await
    }

    /// Cancels any gesture in flight without touching the board.
    ///
    /// Safe to call at any time; returns `None` when nothing was in flight.
    pub async fn cancel_drag(&mut self) -> Option<SessionOutcome> {
        let _discarded = self.recognizer.interrupt();
        let effect = self.orchestrator.force_cancel();
        self.apply(effect).await
    }

    async fn apply(&self, effect: DragEffect) -> Option<SessionOutcome> {
        match effect {
            DragEffect::Ignored | DragEffect::PreviewUnchanged => None,
            DragEffect::Armed(drag) => Some(SessionOutcome::DragStarted(drag)),
            DragEffect::PreviewChanged(preview) => {
                self.service.render_preview(preview.as_ref()).await;
                Some(SessionOutcome::PreviewChanged(preview))
            }
            DragEffect::Commit(request) => {
                let result = self
                    .service
                    .move_item(request.from, request.to, request.item, request.index)
                    .await;
                match result {
                    Ok(receipt) => Some(SessionOutcome::Moved(receipt)),
                    Err(err) => {
                        tracing::warn!(error = %err, ?request, "drop could not be committed");
                        self.service.render_preview(None).await;
                        Some(SessionOutcome::MoveRejected(request))
                    }
                }
            }
            DragEffect::Cancelled {
                item,
                reason,
                cleared_preview,
            } => {
                if cleared_preview {
                    self.service.render_preview(None).await;
                }
                Some(SessionOutcome::DragCancelled { item, reason })
            }
        }
    }
}
