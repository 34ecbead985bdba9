//! Persistence across reopen using [`FileBoardStore`].

use crate::board_flows::helpers::{TestError, start};
use camino::Utf8PathBuf;
use kanban_board::{
    board::{
        adapters::{file::FileBoardStore, memory::RecordingNotifier},
        domain::ColumnId,
        ports::Notice,
        services::BoardService,
    },
    clock::ManualClock,
    config::{BoardConfig, DEFAULT_STORAGE_KEY, PersistenceMode},
};
use std::sync::Arc;
use tempfile::TempDir;

type FileService = BoardService<FileBoardStore, ManualClock>;

fn board_dir(temp: &TempDir) -> Result<Utf8PathBuf, TestError> {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| TestError::from(format!("non UTF-8 temp dir: {}", path.display())))
}

async fn open_service(
    dir: &Utf8PathBuf,
    config: BoardConfig,
    notifier: Arc<RecordingNotifier>,
) -> Result<FileService, TestError> {
    let store = Arc::new(FileBoardStore::open(dir, &config.storage_key)?);
    Ok(BoardService::builder(store, Arc::new(ManualClock::new(start())))
        .with_config(config)
        .with_notifier(notifier)
        .open()
        .await)
}

#[tokio::test]
async fn board_survives_reopen() -> Result<(), TestError> {
    let temp = TempDir::new()?;
    let dir = board_dir(&temp)?;
    let notifier = Arc::new(RecordingNotifier::new());

    let first = open_service(&dir, BoardConfig::default(), Arc::clone(&notifier)).await?;
    let alpha = first.add_item(ColumnId::new(0), "Alpha ✓").await?;
    first.add_item(ColumnId::new(0), "Beta").await?;
    first
        .move_item(ColumnId::new(0), ColumnId::new(2), alpha.id(), 0)
        .await?;
    let before = first.board().await;
    drop(first);

    let second = open_service(&dir, BoardConfig::default(), Arc::clone(&notifier)).await?;

    assert_eq!(second.board().await, before);
    assert!(!notifier.notices().contains(&Notice::LoadFailed));
    assert!(dir.join(format!("{DEFAULT_STORAGE_KEY}.json")).exists());
    Ok(())
}

#[tokio::test]
async fn ids_keep_increasing_after_reopen() -> Result<(), TestError> {
    let temp = TempDir::new()?;
    let dir = board_dir(&temp)?;
    let notifier = Arc::new(RecordingNotifier::new());

    let first = open_service(&dir, BoardConfig::default(), Arc::clone(&notifier)).await?;
    let old = first.add_item(ColumnId::new(1), "old").await?;
    drop(first);

    let second = open_service(&dir, BoardConfig::default(), notifier).await?;
    let new = second.add_item(ColumnId::new(1), "new").await?;

    assert!(new.id() > old.id());
    Ok(())
}

#[tokio::test]
async fn corrupt_file_starts_fresh_with_notice() -> Result<(), TestError> {
    let temp = TempDir::new()?;
    let dir = board_dir(&temp)?;
    std::fs::write(dir.join(format!("{DEFAULT_STORAGE_KEY}.json")), "{ not json")?;
    let notifier = Arc::new(RecordingNotifier::new());

    let service = open_service(&dir, BoardConfig::default(), Arc::clone(&notifier)).await?;

    assert_eq!(service.board().await.item_count(), 0);
    assert_eq!(notifier.notices(), vec![Notice::LoadFailed]);
    Ok(())
}

#[tokio::test]
async fn debounced_write_lands_on_flush() -> Result<(), TestError> {
    let temp = TempDir::new()?;
    let dir = board_dir(&temp)?;
    let notifier = Arc::new(RecordingNotifier::new());
    let config = BoardConfig {
        persistence: PersistenceMode::Debounced { delay_ms: 60_000 },
        storage_key: "debounced".to_owned(),
        ..BoardConfig::default()
    };

    let first = open_service(&dir, config.clone(), Arc::clone(&notifier)).await?;
    first.add_item(ColumnId::new(3), "shipped").await?;
    assert!(first.has_pending_write());
    first.flush().await?;
    assert!(!first.has_pending_write());
    drop(first);

    let second = open_service(&dir, config, notifier).await?;
    let texts: Vec<String> = second
        .board()
        .await
        .column(ColumnId::new(3))?
        .items()
        .iter()
        .map(|item| item.text().as_str().to_owned())
        .collect();

    assert_eq!(texts, vec!["shipped"]);
    Ok(())
}
