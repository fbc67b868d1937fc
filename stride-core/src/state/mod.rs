//! Session state machine
//!
//! Tracks the lifecycle the machine has acknowledged. Transitions are
//! driven by successfully delivered commands.

pub mod machine;

pub use machine::SessionState;
