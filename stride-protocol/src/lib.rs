//! FTMS treadmill wire protocol
//!
//! This crate maps semantic treadmill commands onto control point writes and
//! decodes treadmill data notifications into metrics. It performs no I/O and
//! holds no state; the BLE transport lives in the embedding application.
//!
//! # Control point
//!
//! ```text
//! ┌────────┬──────────────────┐
//! │ OPCODE │ PARAMETER        │
//! │ 1B     │ 0–2B             │
//! └────────┴──────────────────┘
//! ```
//!
//! # Treadmill data
//!
//! ```text
//! 0    2       4               11        13        17       19
//! ┌────┬───────┬───────────────┬─────────┬─────────┬────────┐
//! │ .. │ SPEED │ DISTANCE      │ ENERGY  │ ..      │ TIME   │
//! │    │ u16   │ u56           │ u16     │         │ u16    │
//! └────┴───────┴───────────────┴─────────┴─────────┴────────┘
//! ```
//!
//! All multi-byte fields are little-endian and unsigned.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod gatt;
pub mod speed;
pub mod telemetry;

pub use command::{Command, CommandError, MAX_COMMAND_LEN};
pub use speed::{Speed, SpeedError};
pub use telemetry::{DecodeError, TelemetrySample, MIN_FRAME_LEN};
