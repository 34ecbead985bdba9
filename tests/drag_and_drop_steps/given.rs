//! Given steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::WrapErr;
use kanban_board::board::domain::ColumnId;
use rstest_bdd_macros::given;

#[given("an empty board")]
fn empty_board(world: &mut DragWorld) -> Result<(), eyre::Report> {
    world.open();
    Ok(())
}

#[given(r#"items "{first}" and "{second}" in column {column}"#)]
fn items_in_column(
    world: &mut DragWorld,
    first: String,
    second: String,
    column: usize,
) -> Result<(), eyre::Report> {
    for text in [first, second] {
        let session = world.session()?;
        run_async(session.service().add_item(ColumnId::new(column), &text))
            .wrap_err_with(|| format!("add '{text}'"))?;
    }
    world.baseline = Some(world.board()?);
    Ok(())
}
