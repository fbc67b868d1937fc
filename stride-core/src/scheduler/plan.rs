//! Workout plans

use heapless::Vec;
use stride_protocol::{Speed, SpeedError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum intervals per plan
pub const MAX_INTERVALS: usize = 64;

/// A single workout step
///
/// The belt is set to `speed` and held there for `duration_s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// Target belt speed
    pub speed: Speed,
    /// Hold time in seconds
    pub duration_s: u32,
}

impl Interval {
    /// Create an interval
    pub const fn new(speed: Speed, duration_s: u32) -> Self {
        Self { speed, duration_s }
    }

    /// Create an interval from a speed in meters per second
    pub fn from_mps(speed_mps: f64, duration_s: u32) -> Result<Self, SpeedError> {
        Ok(Self::new(Speed::from_mps(speed_mps)?, duration_s))
    }
}

/// Plan construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanError {
    /// Plan already holds [`MAX_INTERVALS`] intervals
    TooManyIntervals,
}

/// Ordered list of intervals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkoutPlan {
    intervals: Vec<Interval, MAX_INTERVALS>,
}

impl WorkoutPlan {
    /// Create an empty plan
    pub const fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Build a plan from a slice of intervals
    pub fn from_intervals(intervals: &[Interval]) -> Result<Self, PlanError> {
        let mut plan = Self::new();
        plan.intervals
            .extend_from_slice(intervals)
            .map_err(|_| PlanError::TooManyIntervals)?;
        Ok(plan)
    }

    /// Append an interval
    pub fn push(&mut self, interval: Interval) -> Result<(), PlanError> {
        self.intervals
            .push(interval)
            .map_err(|_| PlanError::TooManyIntervals)
    }

    /// Intervals in execution order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the plan has no intervals
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Sum of interval durations, excluding warm-up (seconds)
    pub fn total_duration_s(&self) -> u64 {
        self.intervals.iter().map(|i| i.duration_s as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_intervals() {
        let plan = WorkoutPlan::from_intervals(&[
            Interval::from_mps(2.0, 10).unwrap(),
            Interval::from_mps(3.0, 20).unwrap(),
        ])
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.intervals()[1].speed.as_centi(), 300);
        assert_eq!(plan.total_duration_s(), 30);
    }

    #[test]
    fn test_capacity() {
        let interval = Interval::new(Speed::from_centi(100), 1);
        let mut plan = WorkoutPlan::new();
        for _ in 0..MAX_INTERVALS {
            plan.push(interval).unwrap();
        }
        assert_eq!(plan.push(interval), Err(PlanError::TooManyIntervals));

        let too_many = [interval; MAX_INTERVALS + 1];
        assert_eq!(
            WorkoutPlan::from_intervals(&too_many),
            Err(PlanError::TooManyIntervals)
        );
    }

    #[test]
    fn test_invalid_speed() {
        assert_eq!(
            Interval::from_mps(700.0, 10),
            Err(SpeedError::InvalidSpeedRange)
        );
    }

    #[test]
    fn test_empty_plan() {
        let plan = WorkoutPlan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.total_duration_s(), 0);
    }
}
