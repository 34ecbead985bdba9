//! Write-behind persistence of board snapshots.
//!
//! In immediate mode a request writes before returning. In debounced mode a
//! request schedules a delayed write and supersedes whichever write was
//! still waiting, so a burst of mutations produces a single save of the
//! newest snapshot. Every request and flush takes a new generation; a
//! delayed write only runs if its generation is still current once it holds
//! the write lock. A save that has started always runs to completion, and
//! all writes are serialized through that lock.

use crate::board::{
    ports::{BoardStore, BoardStoreResult, Notice, Notifier},
    snapshot::SerializedBoard,
};
use crate::config::PersistenceMode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub(crate) struct PersistenceWriter<S>
where
    S: BoardStore + 'static,
{
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    delay: Option<Duration>,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl<S> PersistenceWriter<S>
where
    S: BoardStore + 'static,
{
    pub(crate) fn new(store: Arc<S>, notifier: Arc<dyn Notifier>, mode: PersistenceMode) -> Self {
        Self {
            store,
            notifier,
            delay: mode.delay(),
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Persists `snapshot` according to the configured mode.
    pub(crate) async fn request(&self, snapshot: SerializedBoard) {
        let issued = self.supersede();
        let Some(delay) = self.delay else {
            if let Err(err) = self.write(&snapshot).await {
                tracing::debug!(error = %err, "immediate save failed");
            }
            return;
        };

        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let write_lock = Arc::clone(&self.write_lock);
        let generation = Arc::clone(&self.generation);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let guard = write_lock.lock().await;
            if generation.load(Ordering::Acquire) != issued {
                tracing::debug!(generation = issued, "delayed board save superseded");
                return;
            }
            if let Err(err) = save_reporting(&*store, &*notifier, &snapshot).await {
                tracing::debug!(error = %err, "delayed save failed");
            }
            drop(guard);
        });

        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Writes `snapshot` now, superseding any pending delayed write.
    pub(crate) async fn flush(&self, snapshot: &SerializedBoard) -> BoardStoreResult<()> {
        self.supersede();
        self.write(snapshot).await
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    async fn write(&self, snapshot: &SerializedBoard) -> BoardStoreResult<()> {
        let _guard = self.write_lock.lock().await;
        save_reporting(&*self.store, &*self.notifier, snapshot).await
    }

    /// Starts a new generation and forgets the pending delayed write.
    ///
    /// The forgotten task stays alive and skips its save once it sees the
    /// newer generation.
    fn supersede(&self) -> u64 {
        let issued = self
            .generation
            .fetch_add(1, Ordering::AcqRel)
            .wrapping_add(1);
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("superseding pending board save");
        }
        issued
    }
}

async fn save_reporting<S>(
    store: &S,
    notifier: &dyn Notifier,
    snapshot: &SerializedBoard,
) -> BoardStoreResult<()>
where
    S: BoardStore + ?Sized,
{
    let result = store.save(snapshot).await;
    match &result {
        Ok(()) => tracing::debug!(items = snapshot.item_ids().len(), "board saved"),
        Err(err) => {
            tracing::warn!(error = %err, "board save failed; keeping in-memory state");
            notifier.notify(&Notice::SaveFailed);
        }
    }
    result
}
