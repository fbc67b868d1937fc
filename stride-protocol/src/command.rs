//! Control point commands
//!
//! Commands written to the fitness machine control point:
//! - Start/resume: single opcode byte
//! - Stop and pause: shared opcode with a one-byte parameter
//! - Target speed: opcode followed by a little-endian `u16` in 0.01 m/s

use core::fmt;

use heapless::Vec;

use crate::speed::Speed;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Control point opcodes
pub const OP_SET_TARGET_SPEED: u8 = 0x02;
pub const OP_START_OR_RESUME: u8 = 0x07;
pub const OP_STOP_OR_PAUSE: u8 = 0x08;

// Stop/pause parameter values
pub const PARAM_STOP: u8 = 0x01;
pub const PARAM_PAUSE: u8 = 0x02;

/// Longest encoded command (opcode + u16 speed)
pub const MAX_COMMAND_LEN: usize = 3;

/// Errors that can occur when parsing control point bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Opcode (or stop/pause parameter) is not one this crate speaks
    UnknownOpcode(u8),
    /// Byte count does not match the opcode
    InvalidLength,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownOpcode(op) => write!(f, "unknown control point opcode {:#04x}", op),
            CommandError::InvalidLength => f.write_str("control point write has the wrong length"),
        }
    }
}

impl core::error::Error for CommandError {}

/// A treadmill control command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    /// Start or resume the belt
    Start,
    /// Pause; the machine keeps accumulated distance/time
    Pause,
    /// Stop; the machine resets accumulated progress
    Stop,
    /// Change target belt speed
    SetSpeed(Speed),
}

impl Command {
    /// Encode into control point bytes
    pub fn encode(&self) -> Vec<u8, MAX_COMMAND_LEN> {
        let mut bytes = Vec::new();
        // Every arm writes at most MAX_COMMAND_LEN bytes, so pushes cannot fail
        match self {
            Command::Start => {
                let _ = bytes.push(OP_START_OR_RESUME);
            }
            Command::Pause => {
                let _ = bytes.extend_from_slice(&[OP_STOP_OR_PAUSE, PARAM_PAUSE]);
            }
            Command::Stop => {
                let _ = bytes.extend_from_slice(&[OP_STOP_OR_PAUSE, PARAM_STOP]);
            }
            Command::SetSpeed(speed) => {
                let [lo, hi] = speed.to_le_bytes();
                let _ = bytes.extend_from_slice(&[OP_SET_TARGET_SPEED, lo, hi]);
            }
        }
        bytes
    }

    /// Parse control point bytes back into a command
    pub fn parse(bytes: &[u8]) -> Result<Self, CommandError> {
        let (&opcode, param) = bytes.split_first().ok_or(CommandError::InvalidLength)?;

        match opcode {
            OP_START_OR_RESUME => {
                if !param.is_empty() {
                    return Err(CommandError::InvalidLength);
                }
                Ok(Command::Start)
            }
            OP_STOP_OR_PAUSE => match param {
                [PARAM_STOP] => Ok(Command::Stop),
                [PARAM_PAUSE] => Ok(Command::Pause),
                [other] => Err(CommandError::UnknownOpcode(*other)),
                _ => Err(CommandError::InvalidLength),
            },
            OP_SET_TARGET_SPEED => match param {
                [lo, hi] => Ok(Command::SetSpeed(Speed::from_le_bytes([*lo, *hi]))),
                _ => Err(CommandError::InvalidLength),
            },
            other => Err(CommandError::UnknownOpcode(other)),
        }
    }

    /// Returns true for commands that halt the belt (pause or stop)
    pub fn is_halt(&self) -> bool {
        matches!(self, Command::Pause | Command::Stop)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("start"),
            Command::Pause => f.write_str("pause"),
            Command::Stop => f.write_str("stop"),
            Command::SetSpeed(speed) => write!(f, "set-speed {} m/s", speed),
        }
    }
}
