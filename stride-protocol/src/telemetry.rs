//! Treadmill data notification decoding
//!
//! Frames are decoded at fixed offsets. Only the length is validated; field
//! values are passed through exactly as the machine reported them.

use core::fmt;

use crate::speed::Speed;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest frame that carries every decoded field
pub const MIN_FRAME_LEN: usize = 19;

// Field offsets (start inclusive, end exclusive)
const SPEED: (usize, usize) = (2, 4);
const DISTANCE: (usize, usize) = (4, 11);
const CALORIES: (usize, usize) = (11, 13);
const ELAPSED: (usize, usize) = (17, 19);

/// Errors that can occur when decoding a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame is shorter than [`MIN_FRAME_LEN`]
    MalformedFrame {
        /// Length of the rejected frame
        len: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedFrame { len } => write!(
                f,
                "telemetry frame is {} bytes, need at least {}",
                len, MIN_FRAME_LEN
            ),
        }
    }
}

impl core::error::Error for DecodeError {}

/// One decoded telemetry notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetrySample {
    /// Instantaneous belt speed
    pub speed: Speed,
    /// Total distance in meters (56-bit field)
    pub distance_m: u64,
    /// Expended energy
    pub calories: u16,
    /// Elapsed workout time in seconds
    pub elapsed_s: u16,
}

impl TelemetrySample {
    /// Decode a notification payload
    ///
    /// Bytes past [`MIN_FRAME_LEN`] are ignored.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        if frame.len() < MIN_FRAME_LEN {
            return Err(DecodeError::MalformedFrame { len: frame.len() });
        }

        Ok(Self {
            speed: Speed::from_centi(read_le(frame, SPEED) as u16),
            distance_m: read_le(frame, DISTANCE),
            calories: read_le(frame, CALORIES) as u16,
            elapsed_s: read_le(frame, ELAPSED) as u16,
        })
    }
}

/// Read an unsigned little-endian integer of up to 8 bytes
fn read_le(frame: &[u8], (start, end): (usize, usize)) -> u64 {
    frame[start..end]
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64)
}

impl fmt::Display for TelemetrySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed: {} m/s, distance: {} m, calories: {}, time: {} s",
            self.speed, self.distance_m, self.calories, self.elapsed_s
        )
    }
}
