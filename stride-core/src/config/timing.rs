//! Workout timing

use super::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grace period between `Start` and the first speed command (ms)
pub const DEFAULT_WARMUP_MS: u32 = 5_000;

/// How often long waits check the cancellation flag (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1_000;

/// Timing for a workout run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkoutTiming {
    /// Wait after `Start` before the first interval (ms)
    pub warmup_ms: u32,
    /// Cancellation poll cadence; bounds stop latency (ms)
    pub poll_interval_ms: u32,
}

impl Default for WorkoutTiming {
    fn default() -> Self {
        Self {
            warmup_ms: DEFAULT_WARMUP_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WorkoutTiming {
    /// Check the timing is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}
