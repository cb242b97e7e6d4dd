// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the command once per
//! token, using `tokio::process::Command`, and turning the child's
//! termination into an [`ExitOutcome`].
//!
//! - [`command`] holds the literal command vector and classifies spawn
//!   errors into "could not create a process" and "could not exec".
//! - [`outcome`] normalizes wait statuses (exit code vs. signal).
//! - [`backend`] provides the `Launcher` trait and the concrete
//!   `ProcessLauncher` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod command;
pub mod outcome;

pub use backend::{LaunchRequest, Launcher, ProcessLauncher, QUERY_FILENAME, QueryFilename};
pub use command::CommandSpec;
pub use outcome::ExitOutcome;
