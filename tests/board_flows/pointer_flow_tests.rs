//! Pointer drag flows.

use crate::board_flows::helpers::{Flow, TestError};
use kanban_board::{
    board::{domain::ColumnId, ports::InsertionPreview},
    drag::DragState,
    gesture::{CancelReason, InputEvent, InputModality, Point},
    session::SessionOutcome,
};

#[test]
fn drag_into_empty_column_commits_and_persists() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    let started = flow.feed(&InputEvent::PointerDown {
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    assert!(matches!(
        started.as_slice(),
        [SessionOutcome::DragStarted(drag)] if drag.item == a.id()
            && drag.modality == InputModality::Pointer
    ));

    let drop_point = flow.column_point(1, 45.0)?;
    let at = flow.tick(16);
    let hovered = flow.feed(&InputEvent::PointerMove {
        position: drop_point,
        at,
    });
    assert_eq!(
        hovered,
        vec![SessionOutcome::PreviewChanged(Some(InsertionPreview {
            item: a.id(),
            column: ColumnId::new(1),
            index: 0,
        }))]
    );

    let at = flow.tick(16);
    let dropped = flow.feed(&InputEvent::PointerUp {
        position: drop_point,
        at,
    });
    let [SessionOutcome::Moved(receipt)] = dropped.as_slice() else {
        return Err(format!("expected one move, got {dropped:?}").into());
    };
    assert_eq!(receipt.from, ColumnId::new(0));
    assert_eq!(receipt.from_index, 0);
    assert_eq!(receipt.to, ColumnId::new(1));
    assert_eq!(receipt.to_index, 0);

    assert_eq!(flow.texts(0), vec!["B"]);
    assert_eq!(flow.texts(1), vec!["A"]);
    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    assert_eq!(flow.stored_board()?, flow.board());
    Ok(())
}

#[test]
fn drop_above_first_item_reorders_within_column() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B", "C"])?;
    let c = items.get(2).ok_or("seeded item missing")?;

    let origin = flow.center(c.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::PointerDown {
        target: Some(Flow::target(c, 0)),
        position: origin,
        at,
    });
    let above_first = flow.column_point(0, 45.0)?;
    let at = flow.tick(16);
    flow.feed(&InputEvent::PointerMove {
        position: above_first,
        at,
    });
    let at = flow.tick(16);
    flow.feed(&InputEvent::PointerUp {
        position: above_first,
        at,
    });

    assert_eq!(flow.texts(0), vec!["C", "A", "B"]);
    Ok(())
}

#[test]
fn device_cancel_leaves_board_and_store_untouched() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    let before = flow.board();
    let saves_before = flow.store.save_count()?;

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::PointerDown {
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    for column in 1..=3 {
        let hover = flow.column_point(column, 45.0)?;
        let at = flow.tick(16);
        flow.feed(&InputEvent::PointerMove {
            position: hover,
            at,
        });
    }
    let at = flow.tick(16);
    let cancelled = flow.feed(&InputEvent::PointerCancel { at });

    assert_eq!(
        cancelled,
        vec![SessionOutcome::DragCancelled {
            item: a.id(),
            reason: CancelReason::DeviceCancelled,
        }]
    );
    assert_eq!(flow.board(), before);
    assert_eq!(flow.store.save_count()?, saves_before);
    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    Ok(())
}

#[test]
fn release_outside_board_cancels() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    let before = flow.board();

    let origin = flow.center(a.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::PointerDown {
        target: Some(Flow::target(a, 0)),
        position: origin,
        at,
    });
    let hover = flow.column_point(1, 45.0)?;
    let at = flow.tick(16);
    flow.feed(&InputEvent::PointerMove {
        position: hover,
        at,
    });
    let outside = Point::new(5_000.0, 5_000.0);
    let at = flow.tick(16);
    let left = flow.feed(&InputEvent::PointerMove {
        position: outside,
        at,
    });
    assert_eq!(left, vec![SessionOutcome::PreviewChanged(None)]);

    let at = flow.tick(16);
    let released = flow.feed(&InputEvent::PointerUp {
        position: outside,
        at,
    });

    assert_eq!(
        released,
        vec![SessionOutcome::DragCancelled {
            item: a.id(),
            reason: CancelReason::ReleasedOutside,
        }]
    );
    assert_eq!(flow.board(), before);
    Ok(())
}

#[test]
fn press_on_empty_space_does_nothing() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    flow.seed(0, &["A"])?;
    let position = flow.column_point(2, 300.0)?;
    let at = flow.tick(0);

    let outcomes = flow.feed(&InputEvent::PointerDown {
        target: None,
        position,
        at,
    });

    assert!(outcomes.is_empty());
    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    Ok(())
}
