//! Telemetry path
//!
//! Notification payloads are decoded by [`TelemetryHandler`] and queued on a
//! bounded [`TelemetryChannel`] for any number of readers.

pub mod channel;

pub use channel::{
    DefaultTelemetryChannel, TelemetryChannel, TelemetryCounts, TelemetryHandler, TelemetryStats,
    DEFAULT_TELEMETRY_DEPTH,
};
