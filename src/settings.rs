//! Host loop settings
//!
//! Gameplay constants live in `consts`; these only shape how the host drives
//! the simulation. Built in process, never read from disk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TICK_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Ticks allowed per loop iteration when catching up
    pub max_substeps: u32,
    /// Stop after this many ticks even if the ball is still in play
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Run that stops after `max_ticks`
    pub fn bounded(max_ticks: u64) -> Self {
        Self {
            max_ticks: Some(max_ticks),
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// True once `ticks` has reached the configured limit
    pub fn tick_limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks.is_some_and(|max| ticks >= max)
    }
}
