//! Application configuration.
//!
//! Every section has working defaults, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use kanban_board::config::AppConfig;
//!
//! let config = AppConfig::from_json_str("{}").expect("defaults");
//! assert_eq!(config.board.columns.len(), 5);
//! assert_eq!(config.gesture.long_press_ms, 300);
//! ```

use crate::board::domain::ColumnDefinition;
use crate::gesture::GestureConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Key of the durable slot the board is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "dl-order-tracker";

/// When board changes reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Every mutation is written before the operation returns.
    #[default]
    Immediate,
    /// Writes are delayed; a newer request supersedes a pending one.
    Debounced {
        /// Delay before the pending write runs.
        delay_ms: u64,
    },
}

impl PersistenceMode {
    /// Returns the debounce delay, if any.
    #[must_use]
    pub const fn delay(self) -> Option<Duration> {
        match self {
            Self::Immediate => None,
            Self::Debounced { delay_ms } => Some(Duration::from_millis(delay_ms)),
        }
    }
}

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Column definitions, fixed for the lifetime of the process.
    pub columns: Vec<ColumnDefinition>,
    /// Storage key used by file-backed stores.
    pub storage_key: String,
    /// Persistence policy.
    pub persistence: PersistenceMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnDefinition::defaults(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            persistence: PersistenceMode::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Board section.
    pub board: BoardConfig,
    /// Gesture section.
    pub gesture: GestureConfig,
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`AppConfig`].
    #[error("invalid configuration: {0}")]
    Parse(String),
}

impl AppConfig {
    /// Parses configuration from JSON; absent sections keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
