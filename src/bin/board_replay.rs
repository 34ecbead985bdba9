//! Replays a scripted session against a file-backed board.
//!
//! Usage:
//!
//! ```text
//! board_replay <board-dir> <script-path>
//! ```
//!
//! The board is stored as `<storage_key>.json` inside `board-dir`. The
//! script is JSON; every field except `steps` is optional:
//!
//! ```json
//! {
//!   "config": { "board": { "persistence": { "mode": "debounced", "delay_ms": 50 } } },
//!   "clock_start": "2024-05-01T09:00:00Z",
//!   "steps": [
//!     { "command": { "type": "add_item", "column": 0, "text": "Order 1001" } },
//!     { "input": { "type": "pointer_down", "target": { "item": 1, "column": 0 },
//!                  "position": { "x": 100.0, "y": 70.0 }, "at": 0 } },
//!     { "input": { "type": "pointer_up", "position": { "x": 320.0, "y": 70.0 }, "at": 40 } },
//!     { "export": { "dir": "exports", "options": { "format": "markdown" } } },
//!     "flush"
//!   ]
//! }
//! ```
//!
//! Input timestamps are milliseconds after `clock_start`, and item stamps
//! follow them, so a replay is reproducible. Hit testing uses a fixed grid
//! layout. The final board is printed to stdout as JSON.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use chrono::{DateTime, TimeDelta, Utc};
use kanban_board::{
    board::{
        adapters::file::{DirExportSink, FileBoardStore},
        services::{BoardCommand, BoardService, ExportOptions},
        snapshot::SerializedBoard,
    },
    clock::ManualClock,
    config::AppConfig,
    drag::GridLayout,
    gesture::InputEvent,
    session::BoardSession,
    telemetry,
};
use serde::Deserialize;
use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while replaying a script.
#[derive(Debug, Error)]
enum ReplayError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read script: {0}")]
    ScriptRead(#[source] io::Error),
    #[error("failed to parse script: {0}")]
    ScriptParse(#[source] serde_json::Error),
    #[error("failed to open board directory: {0}")]
    Storage(#[source] io::Error),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to print board: {0}")]
    Output(#[source] BoxError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    #[serde(default)]
    config: AppConfig,
    #[serde(default)]
    clock_start: Option<DateTime<Utc>>,
    #[serde(default)]
    layout: GridLayout,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Input(InputEvent),
    Command(BoardCommand),
    Export {
        dir: String,
        #[serde(default)]
        options: ExportOptions,
    },
    Flush,
}

fn main() -> Result<(), BoxError> {
    telemetry::init();
    let (board_dir, script_path) = parse_args(env::args().skip(1))?;
    let script = load_script(&script_path)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ReplayError::RuntimeInit)?;
    let snapshot = runtime.block_on(replay(&board_dir, script))?;
    print_board(&snapshot)?;
    Ok(())
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<(Utf8PathBuf, Utf8PathBuf), ReplayError> {
    let board_dir = args
        .next()
        .ok_or_else(|| ReplayError::InvalidArgs("missing board directory argument".into()))?;
    let script_path = args
        .next()
        .ok_or_else(|| ReplayError::InvalidArgs("missing script path argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(ReplayError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok((Utf8PathBuf::from(board_dir), Utf8PathBuf::from(script_path)))
}

fn load_script(path: &Utf8Path) -> Result<Script, ReplayError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| ReplayError::InvalidArgs(format!("'{path}' is not a file path")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(ReplayError::ScriptRead)?;
    let raw = dir
        .read_to_string(file_name)
        .map_err(ReplayError::ScriptRead)?;
    serde_json::from_str(&raw).map_err(ReplayError::ScriptParse)
}

async fn replay(board_dir: &Utf8Path, script: Script) -> Result<SerializedBoard, ReplayError> {
    let Script {
        config,
        clock_start,
        layout,
        steps,
    } = script;
    let start = clock_start.unwrap_or_else(Utc::now);
    let clock = Arc::new(ManualClock::new(start));
    let store = Arc::new(
        FileBoardStore::open(board_dir, &config.board.storage_key).map_err(ReplayError::Storage)?,
    );
    let service = Arc::new(
        BoardService::builder(store, Arc::clone(&clock))
            .with_config(config.board.clone())
            .open()
            .await,
    );
    let mut session = BoardSession::new(Arc::clone(&service), config.gesture);

    for step in steps {
        match step {
            Step::Input(input) => {
                let offset = i64::try_from(input.at().as_millis()).unwrap_or(i64::MAX);
                clock.set(start + TimeDelta::milliseconds(offset));
                let board = service.board().await;
                let rendered = layout.layout(&board, session.drag_state().preview());
                for outcome in session.handle_input(&input, &rendered).await {
                    tracing::info!(?outcome, "input applied");
                }
            }
            Step::Command(command) => {
                if let Err(err) = session.dispatch(command).await {
                    tracing::warn!(error = %err, "command refused");
                }
            }
            Step::Export { dir, options } => {
                let exported = match DirExportSink::open(Utf8Path::new(&dir)) {
                    Ok(sink) => service.export_to(&options, &sink).await.map(|_| ()),
                    Err(err) => {
                        tracing::warn!(error = %err, %dir, "export directory unavailable");
                        Ok(())
                    }
                };
                if let Err(err) = exported {
                    tracing::warn!(error = %err, "export failed");
                }
            }
            Step::Flush => {
                if let Err(err) = service.flush().await {
                    tracing::warn!(error = %err, "flush failed");
                }
            }
        }
    }

    if let Err(err) = service.flush().await {
        tracing::warn!(error = %err, "final flush failed");
    }
    Ok(service.snapshot().await)
}

fn print_board(snapshot: &SerializedBoard) -> Result<(), ReplayError> {
    let encoded = snapshot
        .to_json()
        .map_err(|err| ReplayError::Output(Box::new(err)))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{encoded}").map_err(|err| ReplayError::Output(Box::new(err)))
}
