// src/exec/command.rs

//! The externally supplied command vector and how it becomes a process.

use std::ffi::{OsStr, OsString};
use std::io;

use tokio::process::Command;

use crate::errors::QueryError;

/// `ENOEXEC` on Linux and the BSDs.
const ENOEXEC: i32 = 8;

/// Program plus arguments, taken literally (never shell-interpreted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split an argv-style vector; `None` if it is empty.
    pub fn from_argv(argv: Vec<OsString>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Lossy program name for diagnostics.
    pub fn display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Fresh `tokio` command with the program and arguments set; the search
    /// path is consulted when the program contains no slash.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Map a spawn error to the fatal error it represents.
    ///
    /// Errors that the child reports back after fork (program missing, not
    /// executable, not a valid executable) are exec failures; anything else
    /// means the process could not be created.
    pub fn classify_spawn_error(&self, source: io::Error) -> QueryError {
        let command = self.display();
        if is_exec_failure(&source) {
            QueryError::ExecFailed { command, source }
        } else {
            QueryError::Spawn { command, source }
        }
    }
}

fn is_exec_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied | io::ErrorKind::NotADirectory
    ) || err.raw_os_error() == Some(ENOEXEC)
}
