//! Cancellable scheduled tasks driven by caller-supplied time.

use super::InputInstant;

/// Pending deadlines keyed by `K`.
///
/// Scheduling a key that is already pending replaces its deadline, so at
/// most one task exists per key. Nothing runs on its own: callers poll with
/// [`ScheduledTasks::take_due`] whenever time advances.
#[derive(Debug, Clone)]
pub struct ScheduledTasks<K> {
    entries: Vec<(K, InputInstant)>,
}

impl<K> Default for ScheduledTasks<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> ScheduledTasks<K>
where
    K: Copy + Eq,
{
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `deadline`. Returns `true` when an earlier
    /// entry for the same key was replaced.
    pub fn schedule(&mut self, key: K, deadline: InputInstant) -> bool {
        let replaced = self.cancel(key);
        self.entries.push((key, deadline));
        replaced
    }

    /// Cancels `key`. Returns `true` when it was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(pending, _)| *pending != key);
        self.entries.len() != before
    }

    /// Removes and returns every key due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: InputInstant) -> Vec<K> {
        let mut due: Vec<(K, InputInstant)> = Vec::new();
        self.entries.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, deadline)| *deadline);
        due.into_iter().map(|(key, _)| key).collect()
    }

    /// Returns `true` while `key` is pending.
    #[must_use]
    pub fn is_scheduled(&self, key: K) -> bool {
        self.entries.iter().any(|(pending, _)| *pending == key)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<InputInstant> {
        self.entries.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
