//! Board commands issued while a drag is in flight.

use crate::board_flows::helpers::{Flow, TestError, start};
use chrono::TimeDelta;
use kanban_board::{
    board::{domain::ColumnId, services::BoardCommand},
    drag::{DragState, MoveRequest},
    gesture::InputEvent,
    session::SessionOutcome,
};

fn start_pointer_drag(flow: &mut Flow, column: usize, index: usize) -> Result<(), TestError> {
    let board = flow.board();
    let item = board
        .columns()
        .get(column)
        .and_then(|col| col.items().get(index))
        .cloned()
        .ok_or("no item to drag")?;
    let origin = flow.center(item.id())?;
    let at = flow.tick(0);
    flow.feed(&InputEvent::PointerDown {
        target: Some(Flow::target(&item, column)),
        position: origin,
        at,
    });
    Ok(())
}

#[test]
fn deleting_dragged_item_cancels_drag_first() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    start_pointer_drag(&mut flow, 0, 0)?;

    flow.rt.block_on(flow.session.dispatch(BoardCommand::DeleteItem {
        column: ColumnId::new(0),
        item: a.id(),
    }))?;

    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    assert_eq!(flow.texts(0), vec!["B"]);

    let position = flow.column_point(1, 45.0)?;
    let at = flow.tick(16);
    let released = flow.feed(&InputEvent::PointerUp { position, at });
    assert!(released.is_empty());
    assert_eq!(flow.texts(1), Vec::<String>::new());
    Ok(())
}

#[test]
fn clearing_board_cancels_drag() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    flow.seed(0, &["A"])?;
    flow.seed(3, &["D"])?;
    start_pointer_drag(&mut flow, 3, 0)?;

    flow.rt.block_on(flow.session.dispatch(BoardCommand::ClearBoard))?;

    assert_eq!(flow.session.drag_state(), &DragState::Idle);
    assert_eq!(flow.board().item_count(), 0);
    Ok(())
}

#[test]
fn unrelated_command_keeps_drag_alive() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    flow.seed(0, &["A"])?;
    start_pointer_drag(&mut flow, 0, 0)?;
    flow.clock.advance(TimeDelta::minutes(5));

    flow.rt.block_on(flow.session.dispatch(BoardCommand::AddItem {
        column: ColumnId::new(2),
        text: "C".to_owned(),
    }))?;

    assert!(flow.session.drag_state().active().is_some());
    assert_eq!(flow.texts(2), vec!["C"]);
    let added = flow
        .board()
        .column(ColumnId::new(2))?
        .items()
        .first()
        .map(|item| item.timestamp());
    assert_eq!(added, Some(start() + TimeDelta::minutes(5)));
    Ok(())
}

#[test]
fn drop_of_item_removed_behind_session_is_rejected() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    let items = flow.seed(0, &["A", "B"])?;
    let a = items.first().ok_or("seeded item missing")?;
    start_pointer_drag(&mut flow, 0, 0)?;

    let drop_point = flow.column_point(1, 45.0)?;
    let at = flow.tick(16);
    flow.feed(&InputEvent::PointerMove {
        position: drop_point,
        at,
    });
    flow.rt.block_on(
        flow.session
            .service()
            .delete_item(ColumnId::new(0), a.id()),
    )?;

    let at = flow.tick(16);
    let dropped = flow.feed(&InputEvent::PointerUp {
        position: drop_point,
        at,
    });

    assert_eq!(
        dropped,
        vec![SessionOutcome::MoveRejected(MoveRequest {
            from: ColumnId::new(0),
            to: ColumnId::new(1),
            item: a.id(),
            index: 0,
        })]
    );
    assert_eq!(flow.texts(0), vec!["B"]);
    assert_eq!(flow.texts(1), Vec::<String>::new());
    Ok(())
}

#[test]
fn cancel_drag_is_idempotent() -> Result<(), TestError> {
    let mut flow = Flow::open()?;
    flow.seed(0, &["A"])?;
    start_pointer_drag(&mut flow, 0, 0)?;

    let first = flow.rt.block_on(flow.session.cancel_drag());
    let second = flow.rt.block_on(flow.session.cancel_drag());

    assert!(matches!(first, Some(SessionOutcome::DragCancelled { .. })));
    assert_eq!(second, None);
    Ok(())
}
