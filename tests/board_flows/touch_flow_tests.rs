//! Touch drag flows.

use crate::board_flows::helpers::{Flow, TestError};
use kanban_board::{
    drag::DragState,
    gesture::{CancelReason, GesturePhase, InputEvent, InputModality, Point, TouchId},
    session::SessionOutcome,
};

const FINGER: TouchId = TouchId(1);
const SECOND_FINGER: TouchId = TouchId(2);

#[test]
fn long_press_then_drop_moves_item() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let b = items.get(1).ok_or("seeded item missing")?;

    let origin = flow.center(b.id())?;
    let at = flow.tick(0);
    let pressed = flow.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(Flow::target(b, 0)),
        position: origin,
        at,
    });
    assert!(pressed.is_empty());
    assert!(flow.session.recognizer().has_pending_long_press());

    let at = flow.tick(300);
    let started = flow.feed(&InputEvent::Tick { at });
    assert!(matches!(
        started.as_slice(),
        [SessionOutcome::DragStarted(drag)] if drag.modality == InputModality::Touch
    ));

    let drop_point = flow.column_point(2, 45.0)?;
    let at = flow.tick(16);
    flow.feed(&InputEvent::TouchMove {
        touch: FINGER,
        position: drop_point,
        at,
    });
    let at = flow.tick(16);
    let dropped = flow.feed(&InputEvent::TouchEnd {
        touch: FINGER,
        position: drop_point,
        at,
    });

    assert!(matches!(dropped.as_slice(), [SessionOutcome::Moved(_)]));
    assert_eq!(flow.texts(0), vec!["A"]);
    assert_eq!(flow.texts(2), vec!["B"]);
    Ok(())
}

#[test]
fn early_lift_is_a_tap() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A"])?;
    let a = items.first().ok_or("seeded item missing")?;
    let before = flow.board();

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    let at = flow.tick(120);
    let lifted = flow.feed(&InputEvent::TouchEnd {
        touch: FINGER,
        position: origin,
        at,
    });
    let at = flow.tick(1_000);
    let later = flow.feed(&InputEvent::Tick { at });

    assert!(lifted.is_empty());
    assert!(later.is_empty());
    assert!(!flow.session.recognizer().has_pending_long_press());
    assert_eq!(flow.board(), before);
    Ok(())
}

#[test]
fn fast_swipe_is_treated_as_scroll() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    let before = flow.board();

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    let at = flow.tick(80);
    flow.feed(&InputEvent::TouchMove {
        touch: FINGER,
        position: Point::new(origin.x, origin.y + 40.0),
        at,
    });
    let at = flow.tick(400);
    let later = flow.feed(&InputEvent::Tick { at });

    assert!(later.is_empty());
    assert_eq!(flow.session.recognizer().touch_phase(), GesturePhase::Idle);
    assert_eq!(flow.board(), before);
    Ok(())
}

#[test]
fn second_finger_does_not_disturb_drag() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    let b = items.get(1).ok_or("seeded item missing")?;

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    let at = flow.tick(350);
    flow.feed(&InputEvent::Tick { at });

    let other = flow.center(b.id())?;
    let at = flow.tick(16);
    let ignored = flow.feed(&InputEvent::TouchStart {
        touch: SECOND_FINGER,
        target: Some(Flow::target(b, 0)),
        position: other,
        at,
    });

    assert!(ignored.is_empty());
    assert_eq!(
        flow.session.drag_state().active().map(|drag| drag.item),
        Some(a.id())
    );
    Ok(())
}

#[test]
fn detached_item_cancels_touch_drag() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A"])?;
    let a = items.first().ok_or("seeded item missing")?;

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    let at = flow.tick(300);
    flow.feed(&InputEvent::Tick { at });

    let at = flow.tick(16);
    let cancelled = flow.feed(&InputEvent::ItemDetached { item: a.id(), at });

    assert_eq!(
        cancelled,
        vec![SessionOutcome::DragCancelled {
            item: a.id(),
            reason: CancelReason::ItemDetached,
        }]
    );
    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    assert_eq!(flow.texts(0), vec!["A"]);
    Ok(())
}
