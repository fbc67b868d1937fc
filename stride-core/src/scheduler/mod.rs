//! Workout scheduler
//!
//! Runs a plan of (speed, duration) intervals against a controller,
//! checking the session's cancellation flag between intervals and while
//! waiting.

pub mod plan;
pub mod workout;

pub use plan::{Interval, PlanError, WorkoutPlan, MAX_INTERVALS};
pub use workout::{
    wait_cancellable, CommandFailure, WaitOutcome, WorkoutOutcome, WorkoutReport, MAX_FAILURES,
};
