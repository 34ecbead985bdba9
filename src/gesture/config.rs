//! Thresholds used to classify gestures and match drop zones.

use super::InputModality;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Touch hold time before a press becomes a drag, in milliseconds.
    pub long_press_ms: u64,
    /// Per-axis movement that turns a pending touch press into a scroll.
    pub scroll_slop_px: f64,
    /// Margin added around each column when matching pointer drops.
    pub pointer_tolerance_px: f64,
    /// Margin added around each column when matching touch drops.
    pub touch_tolerance_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 300,
            scroll_slop_px: 10.0,
            pointer_tolerance_px: 20.0,
            touch_tolerance_px: 30.0,
        }
    }
}

impl GestureConfig {
    /// Looser thresholds for large or imprecise touch screens.
    #[must_use]
    pub const fn relaxed() -> Self {
        Self {
            long_press_ms: 400,
            scroll_slop_px: 16.0,
            pointer_tolerance_px: 30.0,
            touch_tolerance_px: 48.0,
        }
    }

    /// Returns the long-press threshold.
    #[must_use]
    pub const fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Returns the drop-zone margin for `modality`.
    #[must_use]
    pub const fn tolerance(&self, modality: InputModality) -> f64 {
        match modality {
            InputModality::Pointer => self.pointer_tolerance_px,
            InputModality::Touch => self.touch_tolerance_px,
        }
    }
}
