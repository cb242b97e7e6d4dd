// src/errors.rs

//! Crate-wide error type for fatal conditions.
//!
//! Every variant aborts the run with exit status 1. Per-token problems that
//! only skip a file are not errors in this sense; see
//! [`crate::engine::SkipReason`].

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("No command specified.")]
    NoCommand,

    #[error("reading input: {}", describe_io_error(.0))]
    ReadInput(#[source] io::Error),

    #[error("writing output: {}", describe_io_error(.0))]
    WriteOutput(#[source] io::Error),

    /// The reader of our stdout went away. Ends the run without a message.
    #[error("writing output: reader closed the pipe")]
    OutputClosed,

    #[error("/dev/null: {}", describe_io_error(.0))]
    DiscardSink(#[source] io::Error),

    #[error("{path}: {}", describe_io_error(.source))]
    Stat {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("setenv: cannot bind QUERY_FILENAME to {value:?}: value contains a NUL byte")]
    EnvBinding { value: String },

    #[error("spawn {command}: {}", describe_io_error(.source))]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command}: {}", describe_io_error(.source))]
    ExecFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("wait: {}", describe_io_error(.0))]
    Wait(#[source] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QueryError {
    /// True when the command could not be started at all, as opposed to the
    /// process creation itself failing.
    pub fn is_exec_failure(&self) -> bool {
        matches!(self, QueryError::ExecFailed { .. })
    }

    /// Fatal, but nothing should be printed: the process just exits 1,
    /// the way a filter killed by SIGPIPE would.
    pub fn is_silent(&self) -> bool {
        matches!(self, QueryError::OutputClosed)
    }

    /// Classify a failed write to stdout.
    pub fn from_write(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            QueryError::OutputClosed
        } else {
            QueryError::WriteOutput(err)
        }
    }
}

/// `strerror`-style text: the OS message without the `(os error N)` suffix.
pub fn describe_io_error(err: &io::Error) -> String {
    let text = err.to_string();
    if let Some(code) = err.raw_os_error() {
        let suffix = format!(" (os error {code})");
        if let Some(message) = text.strip_suffix(suffix.as_str()) {
            return message.to_string();
        }
    }
    text
}

pub type Result<T> = std::result::Result<T, QueryError>;
