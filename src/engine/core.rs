// src/engine/core.rs

//! Pure core of the filter.
//!
//! This module holds the per-run bookkeeping and the display decision:
//! - the display policy applied to each [`ExitOutcome`]
//! - the non-fatal error accumulator that selects the final status
//!
//! It has no Tokio types, and does not perform any IO. The dispatcher in
//! [`super::runtime`] feeds it facts and acts on its verdicts.

use std::fmt;
use std::io;

use crate::errors::describe_io_error;
use crate::exec::ExitOutcome;
use crate::types::DisplayPolicy;

/// Exit status for any fatal error.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Why a token was skipped without running the command.
///
/// These never abort the run; they only turn the final status into 2.
#[derive(Debug)]
pub enum SkipReason {
    /// The file could not be opened for reading.
    Open(io::Error),
    /// The path names a directory.
    Directory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Open(err) => f.write_str(&describe_io_error(err)),
            SkipReason::Directory => f.write_str("Is a directory"),
        }
    }
}

/// Whether a dispatched token is written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Emit,
    Suppress,
}

/// Final status of a run that was not aborted by a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every token was dispatched.
    Clean,
    /// At least one token was skipped because of a non-fatal error.
    CompletedWithErrors,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Clean => 0,
            RunStatus::CompletedWithErrors => 2,
        }
    }
}

/// Process-wide counters for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    had_non_fatal_error: bool,
    dispatched: usize,
    emitted: usize,
    skipped: usize,
}

impl RunState {
    pub fn had_non_fatal_error(&self) -> bool {
        self.had_non_fatal_error
    }

    /// Tokens for which the command was run.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn status(&self) -> RunStatus {
        if self.had_non_fatal_error {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Clean
        }
    }
}

/// Display policy plus accumulator.
#[derive(Debug)]
pub struct FilterCore {
    policy: DisplayPolicy,
    state: RunState,
}

impl FilterCore {
    pub fn new(policy: DisplayPolicy) -> Self {
        Self {
            policy,
            state: RunState::default(),
        }
    }

    pub fn policy(&self) -> DisplayPolicy {
        self.policy
    }

    /// A token was skipped; the run will finish with status 2.
    pub fn record_skip(&mut self) {
        self.state.skipped += 1;
        self.state.had_non_fatal_error = true;
    }

    /// A command terminated. Its outcome only decides display; a failing
    /// command is never a run-level error.
    pub fn record_outcome(&mut self, outcome: ExitOutcome) -> Verdict {
        self.state.dispatched += 1;
        if self.policy.should_emit(outcome.return_code()) {
            self.state.emitted += 1;
            Verdict::Emit
        } else {
            Verdict::Suppress
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }
}
