//! Workout files in TOML
//!
//! ```toml
//! [timing]
//! warmup_ms = 5000
//! poll_interval_ms = 1000
//!
//! [[interval]]
//! speed_mps = 2.0
//! duration_s = 10
//! ```
//!
//! `[timing]` and both of its keys are optional.

use alloc::vec::Vec;

use serde::Deserialize;
use stride_protocol::Speed;

use super::{ConfigError, WorkoutConfig, WorkoutTiming};
use crate::scheduler::{Interval, WorkoutPlan};

#[derive(Debug, Deserialize)]
struct WorkoutFile {
    #[serde(default)]
    timing: WorkoutTiming,
    #[serde(default, rename = "interval")]
    intervals: Vec<IntervalEntry>,
}

#[derive(Debug, Deserialize)]
struct IntervalEntry {
    speed_mps: f64,
    duration_s: u32,
}

impl WorkoutConfig {
    /// Parse a workout file
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let file: WorkoutFile = ::toml::from_str(input).map_err(|_| ConfigError::TomlParse)?;

        file.timing.validate()?;

        let mut plan = WorkoutPlan::new();
        for (index, entry) in file.intervals.iter().enumerate() {
            let speed =
                Speed::from_mps(entry.speed_mps).map_err(|_| ConfigError::InvalidSpeed { index })?;
            plan.push(Interval::new(speed, entry.duration_s))
                .map_err(|_| ConfigError::TooManyIntervals)?;
        }

        Ok(Self {
            timing: file.timing,
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MAX_INTERVALS;
    use std::fmt::Write;
    use std::string::String;

    #[test]
    fn test_parse_full_file() {
        let config = WorkoutConfig::from_toml(
            r#"
            [timing]
            warmup_ms = 3000
            poll_interval_ms = 250

            [[interval]]
            speed_mps = 2.0
            duration_s = 10

            [[interval]]
            speed_mps = 3.25
            duration_s = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.warmup_ms, 3000);
        assert_eq!(config.timing.poll_interval_ms, 250);
        assert_eq!(config.plan.len(), 2);
        assert_eq!(config.plan.intervals()[0].speed, Speed::from_centi(200));
        assert_eq!(config.plan.intervals()[1].speed, Speed::from_centi(325));
        assert_eq!(config.plan.intervals()[1].duration_s, 0);
    }

    #[test]
    fn test_timing_defaults() {
        let config = WorkoutConfig::from_toml(
            r#"
            [[interval]]
            speed_mps = 1.5
            duration_s = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.timing, WorkoutTiming::default());
        assert_eq!(config.plan.total_duration_s(), 60);
    }

    #[test]
    fn test_partial_timing() {
        let config = WorkoutConfig::from_toml("[timing]\nwarmup_ms = 0\n").unwrap();
        assert_eq!(config.timing.warmup_ms, 0);
        assert_eq!(config.timing.poll_interval_ms, 1000);
        assert!(config.plan.is_empty());
    }

    #[test]
    fn test_out_of_range_speed() {
        let result = WorkoutConfig::from_toml(
            r#"
            [[interval]]
            speed_mps = 2.0
            duration_s = 10

            [[interval]]
            speed_mps = 700.0
            duration_s = 10
            "#,
        );
        assert_eq!(result.unwrap_err(), ConfigError::InvalidSpeed { index: 1 });

        let negative = WorkoutConfig::from_toml("[[interval]]\nspeed_mps = -1.0\nduration_s = 5\n");
        assert_eq!(negative.unwrap_err(), ConfigError::InvalidSpeed { index: 0 });
    }

    #[test]
    fn test_too_many_intervals() {
        let mut input = String::new();
        for _ in 0..=MAX_INTERVALS {
            let _ = write!(input, "[[interval]]\nspeed_mps = 1.0\nduration_s = 1\n");
        }
        assert_eq!(
            WorkoutConfig::from_toml(&input).unwrap_err(),
            ConfigError::TooManyIntervals
        );
    }

    #[test]
    fn test_zero_poll_interval() {
        let result = WorkoutConfig::from_toml("[timing]\npoll_interval_ms = 0\n");
        assert_eq!(result.unwrap_err(), ConfigError::ZeroPollInterval);
    }

    #[test]
    fn test_invalid_toml() {
        assert_eq!(
            WorkoutConfig::from_toml("[[interval]\nspeed_mps = ").unwrap_err(),
            ConfigError::TomlParse
        );
        // Missing required key
        assert_eq!(
            WorkoutConfig::from_toml("[[interval]]\nspeed_mps = 1.0\n").unwrap_err(),
            ConfigError::TomlParse
        );
    }
}
