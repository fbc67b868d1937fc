//! Telemetry channel and notification handler
//!
//! Backpressure policy: the channel is bounded and the handler never waits
//! for space. When the channel is full the newest sample is dropped and
//! counted in [`TelemetryStats`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use portable_atomic::{AtomicU32, Ordering};

use stride_protocol::TelemetrySample;

use crate::traits::NotificationHandler;

/// Default channel depth (samples)
pub const DEFAULT_TELEMETRY_DEPTH: usize = 16;

/// Queue of decoded samples
///
/// Receiving moves the sample out, so each sample reaches exactly one reader.
pub type TelemetryChannel<M, const N: usize> = Channel<M, TelemetrySample, N>;

/// Telemetry channel with [`DEFAULT_TELEMETRY_DEPTH`] slots
pub type DefaultTelemetryChannel<M> = TelemetryChannel<M, DEFAULT_TELEMETRY_DEPTH>;

/// Snapshot of [`TelemetryStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryCounts {
    /// Samples decoded and queued
    pub queued: u32,
    /// Payloads rejected as malformed
    pub malformed: u32,
    /// Samples decoded but dropped on a full channel
    pub dropped: u32,
}

/// Running counters for the notification path
#[derive(Debug, Default)]
pub struct TelemetryStats {
    queued: AtomicU32,
    malformed: AtomicU32,
    dropped: AtomicU32,
}

impl TelemetryStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            queued: AtomicU32::new(0),
            malformed: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Read all counters
    pub fn snapshot(&self) -> TelemetryCounts {
        TelemetryCounts {
            queued: self.queued.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Decode-and-enqueue handler registered with a notification source
pub struct TelemetryHandler<'a, M: RawMutex, const N: usize> {
    channel: &'a TelemetryChannel<M, N>,
    stats: &'a TelemetryStats,
}

impl<'a, M: RawMutex, const N: usize> TelemetryHandler<'a, M, N> {
    /// Create a handler feeding `channel`
    pub fn new(channel: &'a TelemetryChannel<M, N>, stats: &'a TelemetryStats) -> Self {
        Self { channel, stats }
    }
}

impl<M: RawMutex, const N: usize> Clone for TelemetryHandler<'_, M, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, const N: usize> Copy for TelemetryHandler<'_, M, N> {}

impl<M: RawMutex, const N: usize> NotificationHandler for TelemetryHandler<'_, M, N> {
    fn on_notification(&self, payload: &[u8]) {
        let sample = match TelemetrySample::decode(payload) {
            Ok(sample) => sample,
            Err(e) => {
                self.stats.malformed.fetch_add(1, Ordering::Relaxed);
                warn!("Dropping telemetry notification: {:?}", e);
                return;
            }
        };

        trace!("Telemetry: {:?}", sample);

        match self.channel.try_send(sample) {
            Ok(()) => {
                self.stats.queued.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Telemetry channel full, dropping sample");
            }
        }
    }
}
