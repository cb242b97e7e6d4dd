// src/exec/outcome.rs

//! Normalized termination state of a reaped child.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// How a child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The command exited on its own with this code.
    NormalExit(i32),
    /// The command was terminated by this signal.
    KilledBySignal(i32),
}

impl ExitOutcome {
    /// Classify a wait status.
    ///
    /// Returns `None` for states that are not terminal (stopped or
    /// continued); the caller must wait again.
    pub fn from_status(status: ExitStatus) -> Option<Self> {
        if let Some(code) = status.code() {
            return Some(ExitOutcome::NormalExit(code));
        }
        status.signal().map(ExitOutcome::KilledBySignal)
    }

    /// Shell-style return code: the exit code, or `128 + signal`.
    pub fn return_code(self) -> i32 {
        match self {
            ExitOutcome::NormalExit(code) => code,
            ExitOutcome::KilledBySignal(signal) => signal + 128,
        }
    }

    pub fn is_success(self) -> bool {
        self.return_code() == 0
    }
}
