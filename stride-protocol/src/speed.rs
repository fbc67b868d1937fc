//! Fixed-point belt speed
//!
//! Speeds travel on the wire as an unsigned 16-bit count of centimeters per
//! second, so the representable range is 0.00 to 655.35 m/s.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire scale: one unit is 0.01 m/s
pub const CENTI_PER_MPS: u32 = 100;

/// Errors that can occur when building a speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedError {
    /// Scaled value does not fit the 16-bit wire field (or is negative/NaN)
    InvalidSpeedRange,
}

impl fmt::Display for SpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedError::InvalidSpeedRange => {
                f.write_str("speed does not fit the 16-bit wire field (0.00..=655.35 m/s)")
            }
        }
    }
}

impl core::error::Error for SpeedError {}

/// Belt speed in hundredths of a meter per second
///
/// Any value of this type is encodable; range checks happen when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Speed(u16);

impl Speed {
    /// Belt stopped
    pub const ZERO: Self = Self(0);

    /// Highest speed the wire field can carry (655.35 m/s)
    pub const MAX: Self = Self(u16::MAX);

    /// Build from hundredths of a meter per second
    pub const fn from_centi(centi_mps: u16) -> Self {
        Self(centi_mps)
    }

    /// Build from a wide centi-m/s value, rejecting anything above `u16::MAX`
    pub fn try_from_centi(centi_mps: u32) -> Result<Self, SpeedError> {
        u16::try_from(centi_mps)
            .map(Self)
            .map_err(|_| SpeedError::InvalidSpeedRange)
    }

    /// Build from meters per second, rounding half up to two decimals
    ///
    /// Negative, non-finite, and too-large inputs fail with
    /// [`SpeedError::InvalidSpeedRange`]; nothing is wrapped or clamped.
    pub fn from_mps(mps: f64) -> Result<Self, SpeedError> {
        if !mps.is_finite() || mps < 0.0 {
            return Err(SpeedError::InvalidSpeedRange);
        }

        let scaled = mps * CENTI_PER_MPS as f64 + 0.5;
        if scaled >= (u16::MAX as f64) + 1.0 {
            return Err(SpeedError::InvalidSpeedRange);
        }

        // Truncation of a non-negative value after +0.5 is round-half-up
        Ok(Self(scaled as u16))
    }

    /// Raw wire value (hundredths of m/s)
    pub const fn as_centi(self) -> u16 {
        self.0
    }

    /// Speed in meters per second
    pub fn as_mps(self) -> f64 {
        self.0 as f64 / CENTI_PER_MPS as f64
    }

    /// Little-endian wire encoding
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Parse from the little-endian wire encoding
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

impl From<u16> for Speed {
    fn from(centi_mps: u16) -> Self {
        Self(centi_mps)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / CENTI_PER_MPS as u16;
        let frac = self.0 % CENTI_PER_MPS as u16;
        write!(f, "{}.{:02}", whole, frac)
    }
}
