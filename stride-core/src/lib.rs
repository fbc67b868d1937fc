//! Transport-agnostic treadmill control
//!
//! This crate contains everything between the wire codec and the BLE stack:
//!
//! - Transport traits the embedding application implements (command sink,
//!   notification source)
//! - Shared cancellation flag for a workout session
//! - Bounded telemetry channel fed by the notification handler
//! - Session state machine (idle, running, paused, stopped)
//! - Controller issuing start/pause/stop/set-speed commands
//! - Workout interval scheduler with cancellable waits
//! - Workout timing and plan configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "toml")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod cancel;
pub mod config;
pub mod controller;
pub mod scheduler;
pub mod state;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
mod testing;

pub use cancel::CancellationFlag;
pub use controller::{ControlError, Controller, HoldExit};
pub use scheduler::{Interval, WorkoutOutcome, WorkoutPlan, WorkoutReport};
pub use state::SessionState;
pub use telemetry::{DefaultTelemetryChannel, TelemetryChannel, TelemetryHandler, TelemetryStats};
pub use traits::{Ack, CommandSink, NotificationHandler, NotificationSource, SinkError};

pub use stride_protocol as protocol;
