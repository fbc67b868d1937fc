//! Treadmill controller
//!
//! Owns one logical session: the command sink, the cancellation flag, the
//! acknowledged session state, and telemetry counters.
//!
//! Every operation takes `&self`. Writes are serialized through an async
//! mutex around the sink, so a `stop()` from another task can interleave
//! with a running workout without two writes overlapping on the transport.
//! Ordering between independent callers is still theirs to manage: a
//! `start()` from another task during [`Controller::run_workout`] lowers
//! the flag and the workout keeps running.

use core::cell::Cell;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

use stride_protocol::{Command, Speed};

use crate::cancel::CancellationFlag;
use crate::config::WorkoutTiming;
use crate::state::SessionState;
use crate::telemetry::{TelemetryChannel, TelemetryHandler, TelemetryStats};
use crate::traits::{Ack, CommandSink, NotificationSource, SinkError};

/// Errors returned by controller commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// The control point write failed
    Sink(SinkError),
}

impl From<SinkError> for ControlError {
    fn from(e: SinkError) -> Self {
        ControlError::Sink(e)
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::Sink(e) => write!(f, "control point write failed: {}", e),
        }
    }
}

impl core::error::Error for ControlError {}

/// Why [`Controller::hold_subscription`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldExit {
    /// Session cancellation flag was raised
    Cancelled,
    /// Transport reported the link down
    Disconnected,
}

/// Treadmill controller for a single session
pub struct Controller<M: RawMutex, S: CommandSink> {
    sink: Mutex<M, S>,
    cancel: CancellationFlag,
    state: BlockingMutex<M, Cell<SessionState>>,
    timing: WorkoutTiming,
    telemetry: TelemetryStats,
}

impl<M: RawMutex, S: CommandSink> Controller<M, S> {
    /// Create a controller with the given workout timing
    pub fn new(sink: S, timing: WorkoutTiming) -> Self {
        Self {
            sink: Mutex::new(sink),
            cancel: CancellationFlag::new(),
            state: BlockingMutex::new(Cell::new(SessionState::Idle)),
            timing,
            telemetry: TelemetryStats::new(),
        }
    }

    /// Create a controller with default timing (5 s warm-up, 1 s polling)
    pub fn with_default_timing(sink: S) -> Self {
        Self::new(sink, WorkoutTiming::default())
    }

    /// Session cancellation flag
    ///
    /// Other tasks may raise it to end a running workout at the next poll.
    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancel
    }

    /// Last acknowledged session state
    pub fn state(&self) -> SessionState {
        self.state.lock(|s| s.get())
    }

    /// Workout timing
    pub fn timing(&self) -> &WorkoutTiming {
        &self.timing
    }

    /// Counters for the notification path
    pub fn telemetry_stats(&self) -> &TelemetryStats {
        &self.telemetry
    }

    /// Consume the controller and return the sink
    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }

    /// Start or resume the belt
    ///
    /// Lowers the cancellation flag before writing. If the write fails the
    /// flag is put back the way it was.
    pub async fn start(&self) -> Result<Ack, ControlError> {
        let was_cancelled = self.cancel.is_set();
        self.cancel.reset();

        let result = self.send(Command::Start).await;
        if result.is_err() && was_cancelled {
            self.cancel.cancel();
        }
        result
    }

    /// Pause the belt; the machine keeps accumulated progress
    ///
    /// Raises the cancellation flag before writing.
    pub async fn pause(&self) -> Result<Ack, ControlError> {
        self.cancel.cancel();
        self.send(Command::Pause).await
    }

    /// Stop the belt; the machine resets accumulated progress
    ///
    /// Raises the cancellation flag before writing.
    pub async fn stop(&self) -> Result<Ack, ControlError> {
        self.cancel.cancel();
        self.send(Command::Stop).await
    }

    /// Change the target belt speed
    pub async fn set_speed(&self, speed: Speed) -> Result<Ack, ControlError> {
        self.send(Command::SetSpeed(speed)).await
    }

    /// Encode and write one command
    ///
    /// Not retried. Session state only advances on acknowledgment.
    pub(crate) async fn send(&self, command: Command) -> Result<Ack, ControlError> {
        let payload = command.encode();

        let result = {
            let mut sink = self.sink.lock().await;
            sink.send(&payload).await
        };

        match result {
            Ok(ack) => {
                debug!("Sent {:?}", command);
                let next = self.state.lock(|s| {
                    let next = s.get().transition(command);
                    s.set(next);
                    next
                });
                if command.is_halt() && next.is_halted() {
                    info!("Belt halted, session {:?}", next);
                }
                Ok(ack)
            }
            Err(e) => {
                warn!("Failed to send {:?}: {:?}", command, e);
                Err(e.into())
            }
        }
    }

    /// Register the decode-and-enqueue handler with `source`
    ///
    /// Every delivered frame is decoded and queued on `channel`. Malformed
    /// frames and overflow are counted in [`Self::telemetry_stats`]; the
    /// subscription keeps running either way.
    pub async fn subscribe<'a, N, CM, const D: usize>(
        &'a self,
        source: &mut N,
        channel: &'a TelemetryChannel<CM, D>,
    ) -> Result<(), N::Error>
    where
        CM: RawMutex,
        N: NotificationSource<TelemetryHandler<'a, CM, D>>,
    {
        source
            .subscribe(TelemetryHandler::new(channel, &self.telemetry))
            .await?;
        info!("Subscribed to treadmill data");
        Ok(())
    }

    /// Keep a subscription open until cancellation or disconnection
    ///
    /// Polls every `poll_interval_ms`, then unsubscribes.
    pub async fn hold_subscription<N, H, D>(
        &self,
        source: &mut N,
        delay: &mut D,
    ) -> Result<HoldExit, N::Error>
    where
        H: crate::traits::NotificationHandler,
        N: NotificationSource<H>,
        D: DelayNs,
    {
        let poll_ms = self.timing.poll_interval_ms.max(1);

        let exit = loop {
            if self.cancel.is_set() {
                break HoldExit::Cancelled;
            }
            if !source.is_connected().await {
                break HoldExit::Disconnected;
            }
            delay.delay_ms(poll_ms).await;
        };

        source.unsubscribe().await?;
        info!("Stopped treadmill data subscription ({:?})", exit);
        Ok(exit)
    }
}
