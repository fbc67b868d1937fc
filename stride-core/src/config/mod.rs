//! Configuration types
//!
//! Workout timing knobs and the plan/timing bundle loaded from workout files.

pub mod timing;
#[cfg(feature = "toml")]
pub mod toml;

pub use timing::{WorkoutTiming, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WARMUP_MS};

use core::fmt;

use crate::scheduler::WorkoutPlan;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax or shape error
    TomlParse,
    /// Interval speed outside 0.00..=655.35 m/s
    InvalidSpeed {
        /// Zero-based interval index
        index: usize,
    },
    /// More intervals than a plan can hold
    TooManyIntervals,
    /// Poll interval of zero would never yield
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TomlParse => f.write_str("workout file is not valid TOML"),
            ConfigError::InvalidSpeed { index } => {
                write!(f, "interval {} has a speed outside 0.00..=655.35 m/s", index)
            }
            ConfigError::TooManyIntervals => f.write_str("workout has too many intervals"),
            ConfigError::ZeroPollInterval => f.write_str("poll_interval_ms must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// A workout plan together with its timing
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkoutConfig {
    /// Warm-up and poll cadence
    pub timing: WorkoutTiming,
    /// Intervals to run
    pub plan: WorkoutPlan,
}
