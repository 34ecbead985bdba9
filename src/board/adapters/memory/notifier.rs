//! Notifier that records notices.

use crate::board::ports::{Notice, Notifier};
use std::sync::{Arc, Mutex, PoisonError};

/// Notifier that keeps every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded notice in arrival order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
