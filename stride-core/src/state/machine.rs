//! State machine definition

use stride_protocol::Command;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing started yet
    #[default]
    Idle,
    /// Belt running
    Running,
    /// Belt halted, machine keeps accumulated progress
    Paused,
    /// Belt halted, machine reset accumulated progress
    Stopped,
}

impl SessionState {
    /// Check if the belt is expected to be moving
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Check if the session has been halted (paused or stopped)
    pub fn is_halted(&self) -> bool {
        matches!(self, SessionState::Paused | SessionState::Stopped)
    }

    /// Apply an acknowledged command and return the next state
    ///
    /// `Start` is the only way back to `Running`.
    pub fn transition(self, command: Command) -> Self {
        use SessionState::*;

        match (self, command) {
            (_, Command::Start) => Running,

            (Running, Command::Pause) => Paused,
            (Paused, Command::Pause) => Paused,

            (Running | Paused, Command::Stop) => Stopped,

            // Speed changes and halts with nothing to halt keep the state
            _ => self,
        }
    }
}
