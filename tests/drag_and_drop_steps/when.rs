//! When steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::{WrapErr, eyre};
use kanban_board::{
    board::{
        domain::ColumnId,
        services::BoardCommand,
    },
    gesture::{InputEvent, Point, TouchId},
};
use rstest_bdd_macros::when;

const FINGER: TouchId = TouchId(1);

fn pointer_press(world: &mut DragWorld, text: &str) -> Result<Point, eyre::Report> {
    let target = world.item(text)?;
    let position = world.item_center(&target)?;
    let at = world.tick(0);
    world.feed(&InputEvent::PointerDown {
        target: Some(target),
        position,
        at,
    })?;
    Ok(position)
}

fn pointer_move(world: &mut DragWorld, position: Point) -> Result<(), eyre::Report> {
    let at = world.tick(16);
    world.feed(&InputEvent::PointerMove { position, at })?;
    Ok(())
}

fn pointer_release(world: &mut DragWorld, position: Point) -> Result<(), eyre::Report> {
    let at = world.tick(16);
    world.feed(&InputEvent::PointerUp { position, at })?;
    Ok(())
}

#[when(r#"the pointer drags "{text}" to the top of column {column}"#)]
fn pointer_drag_to_top(
    world: &mut DragWorld,
    text: String,
    column: usize,
) -> Result<(), eyre::Report> {
    pointer_press(world, &text)?;
    let target = world.column_point(column, 45.0)?;
    pointer_move(world, target)?;
    pointer_release(world, target)
}

#[when(r#"the pointer drags "{text}" through columns {first} to {last} and the device cancels"#)]
fn pointer_drag_then_cancel(
    world: &mut DragWorld,
    text: String,
    first: usize,
    last: usize,
) -> Result<(), eyre::Report> {
    pointer_press(world, &text)?;
    for column in first..=last {
        let hover = world.column_point(column, 45.0)?;
        pointer_move(world, hover)?;
    }
    let at = world.tick(16);
    world.feed(&InputEvent::PointerCancel { at })?;
    Ok(())
}

#[when(r#"the pointer drags "{text}" and releases outside the board"#)]
fn pointer_drag_outside(world: &mut DragWorld, text: String) -> Result<(), eyre::Report> {
    pointer_press(world, &text)?;
    pointer_move(world, Point::new(5_000.0, 5_000.0))?;
    pointer_release(world, Point::new(5_000.0, 5_000.0))
}

#[when(r#"the pointer starts dragging "{text}""#)]
fn pointer_starts_drag(world: &mut DragWorld, text: String) -> Result<(), eyre::Report> {
    let origin = pointer_press(world, &text)?;
    pointer_move(world, Point::new(origin.x + 30.0, origin.y))
}

#[when(r#""{text}" is deleted from column {column}"#)]
fn item_deleted(world: &mut DragWorld, text: String, column: usize) -> Result<(), eyre::Report> {
    let target = world.item(&text)?;
    let session = world.session()?;
    run_async(session.dispatch(BoardCommand::DeleteItem {
        column: ColumnId::new(column),
        item: target.item,
    }))
    .wrap_err("delete dragged item")?;
    Ok(())
}

#[when(r#"a finger holds "{text}" for {hold} ms and releases over column {column}"#)]
fn finger_long_press_drag(
    world: &mut DragWorld,
    text: String,
    hold: u64,
    column: usize,
) -> Result<(), eyre::Report> {
    let target = world.item(&text)?;
    let origin = world.item_center(&target)?;
    let at = world.tick(0);
    world.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(target),
        position: origin,
        at,
    })?;

    let at = world.tick(hold);
    let started = world.feed(&InputEvent::Tick { at })?;
    if started.is_empty() {
        return Err(eyre!("long press did not start a drag"));
    }

    let drop_point = world.column_point(column, 45.0)?;
    let at = world.tick(16);
    world.feed(&InputEvent::TouchMove {
        touch: FINGER,
        position: drop_point,
        at,
    })?;
    let at = world.tick(16);
    world.feed(&InputEvent::TouchEnd {
        touch: FINGER,
        position: drop_point,
        at,
    })?;
    Ok(())
}

#[when(r#"a finger swipes {distance} px down from "{text}" within {window} ms"#)]
fn finger_swipe(
    world: &mut DragWorld,
    distance: f64,
    text: String,
    window: u64,
) -> Result<(), eyre::Report> {
    let target = world.item(&text)?;
    let origin = world.item_center(&target)?;
    let at = world.tick(0);
    world.feed(&InputEvent::TouchStart {
        touch: FINGER,
        target: Some(target),
        position: origin,
        at,
    })?;
    let end = Point::new(origin.x, origin.y + distance);
    let at = world.tick(window);
    world.feed(&InputEvent::TouchMove {
        touch: FINGER,
        position: end,
        at,
    })?;
    let at = world.tick(16);
    world.feed(&InputEvent::TouchEnd {
        touch: FINGER,
        position: end,
        at,
    })?;
    Ok(())
}
