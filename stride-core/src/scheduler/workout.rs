//! Workout execution

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;
use stride_protocol::Command;

use super::plan::{WorkoutPlan, MAX_INTERVALS};
use crate::cancel::CancellationFlag;
use crate::controller::{ControlError, Controller};
use crate::traits::{Ack, CommandSink, SinkError};

/// Room for one failure per interval plus the start and the final pause
pub const MAX_FAILURES: usize = MAX_INTERVALS + 2;

/// Result of a cancellable wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// Full duration elapsed
    Elapsed,
    /// Flag was raised before the duration elapsed
    Cancelled,
}

/// How a workout ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkoutOutcome {
    /// Every interval ran to the end
    Completed,
    /// Cancellation cut the plan short
    Cancelled,
}

/// A command that failed during a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFailure {
    pub command: Command,
    pub error: SinkError,
}

/// Summary of a workout run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkoutReport {
    /// How the run ended
    pub outcome: WorkoutOutcome,
    /// Intervals whose speed change was issued
    pub intervals_started: usize,
    /// Failed writes in the order they happened
    pub failures: Vec<CommandFailure, MAX_FAILURES>,
}

impl WorkoutReport {
    fn new() -> Self {
        Self {
            outcome: WorkoutOutcome::Completed,
            intervals_started: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, command: Command, result: Result<Ack, ControlError>) {
        if let Err(ControlError::Sink(error)) = result {
            // At most one write per slot, so this never overflows
            let _ = self.failures.push(CommandFailure { command, error });
        }
    }

    /// Check whether every command was acknowledged
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Wait `total_ms`, checking `flag` before every `poll_ms` chunk
///
/// Cancellation is observed with at most `poll_ms` latency.
pub async fn wait_cancellable<D: DelayNs>(
    flag: &CancellationFlag,
    delay: &mut D,
    total_ms: u64,
    poll_ms: u32,
) -> WaitOutcome {
    let poll_ms = poll_ms.max(1);
    let mut remaining = total_ms;

    while remaining > 0 {
        if flag.is_set() {
            return WaitOutcome::Cancelled;
        }
        let chunk = remaining.min(poll_ms as u64) as u32;
        delay.delay_ms(chunk).await;
        remaining -= chunk as u64;
    }

    WaitOutcome::Elapsed
}

impl<M: RawMutex, S: CommandSink> Controller<M, S> {
    /// Run `plan` from start to the final pause
    ///
    /// Command failures are recorded and never abort the run. The belt is
    /// always paused at the end, cancelled or not.
    pub async fn run_workout<D: DelayNs>(&self, plan: &WorkoutPlan, delay: &mut D) -> WorkoutReport {
        let mut report = WorkoutReport::new();
        let timing = *self.timing();

        info!(
            "Starting workout: {} intervals, {} s",
            plan.len(),
            plan.total_duration_s()
        );

        report.record(Command::Start, self.start().await);
        if !self.state().is_running() {
            warn!("Belt not confirmed running, session {:?}", self.state());
        }

        let warmup = wait_cancellable(
            self.cancellation(),
            delay,
            timing.warmup_ms as u64,
            timing.poll_interval_ms,
        )
        .await;

        if warmup == WaitOutcome::Cancelled {
            report.outcome = WorkoutOutcome::Cancelled;
        } else {
            for (index, interval) in plan.intervals().iter().enumerate() {
                if self.cancellation().is_set() {
                    report.outcome = WorkoutOutcome::Cancelled;
                    break;
                }

                debug!(
                    "Interval {}: {} cm/s for {} s",
                    index,
                    interval.speed.as_centi(),
                    interval.duration_s
                );
                let command = Command::SetSpeed(interval.speed);
                report.record(command, self.set_speed(interval.speed).await);
                report.intervals_started += 1;

                let waited = wait_cancellable(
                    self.cancellation(),
                    delay,
                    interval.duration_s as u64 * 1000,
                    timing.poll_interval_ms,
                )
                .await;

                if waited == WaitOutcome::Cancelled {
                    report.outcome = WorkoutOutcome::Cancelled;
                    break;
                }
            }
        }

        report.record(Command::Pause, self.pause().await);

        info!(
            "Workout {:?}: {} intervals started, {} failed commands",
            report.outcome,
            report.intervals_started,
            report.failures.len()
        );

        report
    }
}
