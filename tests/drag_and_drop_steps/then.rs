//! Then steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::{WrapErr, eyre};
use kanban_board::{
    board::{domain::ColumnDefinition, ports::BoardStore},
    drag::DragState,
    gesture::GesturePhase,
};
use rstest_bdd_macros::then;

#[then(r#"column {column} holds "{items}""#)]
fn column_holds(world: &mut DragWorld, column: usize, items: String) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let texts: Vec<String> = board
        .columns()
        .get(column)
        .ok_or_else(|| eyre!("no column {column}"))?
        .items()
        .iter()
        .map(|item| item.text().as_str().to_owned())
        .collect();
    let expected: Vec<String> = items.split(", ").map(str::to_owned).collect();
    if texts != expected {
        return Err(eyre!("column {column} holds {texts:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then("the stored board matches the live board")]
fn stored_matches_live(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.store.load())
        .wrap_err("load stored board")?
        .ok_or_else(|| eyre!("nothing stored"))?
        .into_board(&ColumnDefinition::defaults())
        .wrap_err("restore stored board")?;
    if stored != world.board()? {
        return Err(eyre!("stored board differs from live board"));
    }
    Ok(())
}

#[then("the board is unchanged since the items were added")]
fn board_unchanged(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let baseline = world
        .baseline
        .clone()
        .ok_or_else(|| eyre!("no baseline recorded"))?;
    if world.board()? != baseline {
        return Err(eyre!("board changed during a gesture that should not commit"));
    }
    Ok(())
}

#[then("no drag is in flight")]
fn no_drag_in_flight(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let session = world.session()?;
    if session.drag_state() != &DragState::Idle {
        return Err(eyre!("drag state is {:?}", session.drag_state()));
    }
    let recognizer = session.recognizer();
    if recognizer.pointer_phase() != GesturePhase::Idle
        || recognizer.touch_phase() != GesturePhase::Idle
    {
        return Err(eyre!("gesture recognizer is not idle"));
    }
    Ok(())
}
