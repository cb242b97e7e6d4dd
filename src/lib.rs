// src/lib.rs

#[cfg(not(unix))]
compile_error!("query only supports Unix-like platforms");

pub mod cli;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod input;
pub mod logging;
pub mod types;

use tokio::io::BufReader;
use tracing::debug;

use crate::cli::Invocation;
use crate::engine::{Dispatcher, RunStatus};
use crate::errors::Result;
use crate::exec::ProcessLauncher;
use crate::input::Tokenizer;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the tokenizer over stdin
/// - the process launcher (discard sink, stderr policy, command vector)
/// - the dispatcher writing matched names to stdout
///
/// Any fatal error is returned as soon as it happens; the caller maps it to
/// exit status 1.
pub async fn run(invocation: Invocation) -> Result<RunStatus> {
    debug!(?invocation, "starting");

    let launcher = ProcessLauncher::new(invocation.command, invocation.stderr)?;
    let tokenizer = Tokenizer::new(BufReader::new(tokio::io::stdin()), invocation.mode);

    let state = Dispatcher::new(tokenizer, tokio::io::stdout(), launcher, invocation.display)
        .run()
        .await?;

    Ok(state.status())
}
