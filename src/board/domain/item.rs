//! Work items held by board columns.

use super::{BoardDomainError, ItemId};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item text, guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemText(String);

impl ItemText {
    /// Creates validated item text. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyItemText`] when the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyItemText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemText {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemText> for String {
    fn from(value: ItemText) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ItemText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A movable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    text: ItemText,
    timestamp: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedItemData {
    /// Persisted item identifier.
    pub id: ItemId,
    /// Persisted item text.
    pub text: ItemText,
    /// Persisted last-modified time.
    pub timestamp: DateTime<Utc>,
}

impl Item {
    pub(crate) fn new(id: ItemId, text: ItemText, clock: &impl Clock) -> Self {
        Self {
            id,
            text,
            timestamp: stamp(clock),
        }
    }

    /// Reconstructs an item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedItemData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            timestamp: data.timestamp,
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the item text.
    #[must_use]
    pub const fn text(&self) -> &ItemText {
        &self.text
    }

    /// Returns the last-modified time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub(crate) fn set_text(&mut self, text: ItemText, clock: &impl Clock) {
        self.text = text;
        self.touch(clock);
    }

    pub(crate) fn touch(&mut self, clock: &impl Clock) {
        self.timestamp = stamp(clock);
    }
}

/// Reads the clock at the millisecond precision the serialized form keeps.
fn stamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(3)
}

/// Formats the age of a timestamp the way item cards display it.
///
/// Anything under a minute is "Just now"; up to a week old is shown in the
/// largest whole unit (`5m ago`, `3h ago`, `2d ago`); older items show their
/// calendar date.
#[must_use]
pub fn format_relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
