//! Control point writes

use core::fmt;

/// Delivery acknowledgment for a control point write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ack;

/// Errors that can occur while writing to the control point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// No link to the machine
    NotConnected,
    /// Machine refused the write
    Rejected,
    /// No acknowledgment arrived in time
    Timeout,
    /// Any other transport-level failure
    Transport,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SinkError::NotConnected => "not connected",
            SinkError::Rejected => "write rejected by machine",
            SinkError::Timeout => "write not acknowledged in time",
            SinkError::Transport => "transport failure",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for SinkError {}

/// Writable control point
///
/// `send` performs one write and waits for the acknowledgment. It never
/// retries; callers decide what to do with a failure.
#[allow(async_fn_in_trait)]
pub trait CommandSink {
    /// Write `payload` and wait for delivery
    async fn send(&mut self, payload: &[u8]) -> Result<Ack, SinkError>;
}

impl<T: CommandSink + ?Sized> CommandSink for &mut T {
    async fn send(&mut self, payload: &[u8]) -> Result<Ack, SinkError> {
        (**self).send(payload).await
    }
}
