// src/exec/backend.rs

//! Pluggable launcher abstraction.
//!
//! The dispatcher talks to a `Launcher` instead of spawning processes
//! itself. Production code uses [`ProcessLauncher`]; tests can provide their
//! own implementation that records what it was asked to run and answers
//! with scripted outcomes.

use std::ffi::{OsStr, OsString};
use std::fs::{File, OpenOptions};
use std::future::Future;
use std::os::unix::ffi::OsStrExt;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Child;
use tracing::{debug, trace};

use crate::errors::{QueryError, Result};
use crate::types::StderrPolicy;

use super::command::CommandSpec;
use super::outcome::ExitOutcome;

/// Environment variable through which each child learns which file it is
/// reading.
pub const QUERY_FILENAME: &str = "QUERY_FILENAME";

/// Value bound to [`QUERY_FILENAME`] for a single spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilename(OsString);

impl QueryFilename {
    /// Validate that `value` can live in a process environment.
    pub fn new(value: &OsStr) -> Result<Self> {
        if value.as_bytes().contains(&b'\0') {
            return Err(QueryError::EnvBinding {
                value: value.to_string_lossy().into_owned(),
            });
        }
        Ok(Self(value.to_os_string()))
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }
}

/// Everything one child needs: its stdin and its `QUERY_FILENAME`.
///
/// `input` is moved into the launcher; once the child holds its own copy the
/// controller's handle is closed.
#[derive(Debug)]
pub struct LaunchRequest {
    pub input: File,
    pub query_filename: QueryFilename,
}

/// Trait abstracting how one command invocation is run to completion.
pub trait Launcher: Send {
    /// Run the command for one file and wait for it to terminate.
    ///
    /// Implementations must not return before the child is fully reaped.
    /// A command that could not be started at all is reported as
    /// [`QueryError::ExecFailed`], never as an [`ExitOutcome`].
    fn launch(
        &mut self,
        request: LaunchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExitOutcome>> + Send + '_>>;
}

/// Real launcher used in production.
///
/// Owns the discard sink (`/dev/null`, opened once per run) and duplicates
/// it for every child's stdout, and for stderr under
/// [`StderrPolicy::Discard`].
#[derive(Debug)]
pub struct ProcessLauncher {
    command: CommandSpec,
    stderr: StderrPolicy,
    sink: File,
}

impl ProcessLauncher {
    pub fn new(command: CommandSpec, stderr: StderrPolicy) -> Result<Self> {
        let sink = OpenOptions::new()
            .write(true)
            .open("/dev/null")
            .map_err(QueryError::DiscardSink)?;
        Ok(Self {
            command,
            stderr,
            sink,
        })
    }

    fn sink_handle(&self) -> Result<Stdio> {
        let dup = self.sink.try_clone().map_err(QueryError::DiscardSink)?;
        Ok(Stdio::from(dup))
    }

    /// Spawn the child. The `Command` (and with it the controller's copies
    /// of the input file and sink duplicates) is dropped on return.
    fn spawn(&self, request: LaunchRequest) -> Result<Child> {
        let stderr = match self.stderr {
            StderrPolicy::Inherit => Stdio::inherit(),
            StderrPolicy::Discard => self.sink_handle()?,
        };

        let mut cmd = self.command.to_command();
        cmd.stdin(Stdio::from(request.input))
            .stdout(self.sink_handle()?)
            .stderr(stderr)
            .env(QUERY_FILENAME, request.query_filename.as_os_str());

        // A failed exec inside the child comes back through the spawn call
        // itself: the child writes its errno to a close-on-exec pipe that
        // the parent reads before `spawn` returns.
        cmd.spawn()
            .map_err(|source| self.command.classify_spawn_error(source))
    }
}

impl Launcher for ProcessLauncher {
    fn launch(
        &mut self,
        request: LaunchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExitOutcome>> + Send + '_>> {
        Box::pin(async move {
            let mut child = self.spawn(request)?;
            debug!(pid = ?child.id(), command = %self.command.display(), "spawned child");

            loop {
                let status = child.wait().await.map_err(QueryError::Wait)?;
                match ExitOutcome::from_status(status) {
                    Some(outcome) => return Ok(outcome),
                    None => trace!(?status, "child not terminated yet; waiting again"),
                }
            }
        })
    }
}
