// src/engine/runtime.rs

use std::fmt;
use std::fs::File;

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::errors::{QueryError, Result};
use crate::exec::{LaunchRequest, Launcher, QueryFilename};
use crate::input::{Token, Tokenizer};
use crate::types::DisplayPolicy;

use super::core::{FilterCore, RunState, SkipReason, Verdict};

/// Drives the per-token loop: pull a token, open and check its file, run
/// the command through a `Launcher`, and write the token out when the
/// display policy says so.
///
/// This is the IO shell around `FilterCore`, which holds the policy and
/// the error accumulator. Exactly one child is in flight at a time: the
/// next token is not read until the previous child has been reaped.
pub struct Dispatcher<R, W, L> {
    tokenizer: Tokenizer<R>,
    output: W,
    launcher: L,
    core: FilterCore,
}

impl<R, W, L> fmt::Debug for Dispatcher<R, W, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<R, W, L> Dispatcher<R, W, L>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: Launcher,
{
    pub fn new(tokenizer: Tokenizer<R>, output: W, launcher: L, policy: DisplayPolicy) -> Self {
        Self {
            tokenizer,
            output,
            launcher,
            core: FilterCore::new(policy),
        }
    }

    /// Main loop.
    ///
    /// Returns the accumulated run state once the input is exhausted, or the
    /// first fatal error.
    pub async fn run(&mut self) -> Result<RunState> {
        info!(
            mode = ?self.tokenizer.mode(),
            policy = ?self.core.policy(),
            "query run started"
        );

        while let Some(token) = self.tokenizer.next_token().await? {
            self.dispatch(token).await?;
        }

        let state = self.core.state();
        info!(
            dispatched = state.dispatched(),
            emitted = state.emitted(),
            skipped = state.skipped(),
            "input exhausted"
        );
        Ok(state)
    }

    /// Handle a single token.
    async fn dispatch(&mut self, token: Token) -> Result<()> {
        let input = match File::open(token.path()) {
            Ok(file) => file,
            Err(err) => {
                self.skip(&token, SkipReason::Open(err));
                return Ok(());
            }
        };

        let metadata = input.metadata().map_err(|source| QueryError::Stat {
            path: token.display(),
            source,
        })?;
        if metadata.is_dir() {
            self.skip(&token, SkipReason::Directory);
            return Ok(());
        }

        let request = LaunchRequest {
            input,
            query_filename: QueryFilename::new(token.as_os_str())?,
        };
        let outcome = self.launcher.launch(request).await?;
        let verdict = self.core.record_outcome(outcome);

        debug!(
            token = %token.display(),
            code = outcome.return_code(),
            emitted = verdict == Verdict::Emit,
            "command finished"
        );

        if verdict == Verdict::Emit {
            self.emit(&token).await?;
        }
        Ok(())
    }

    fn skip(&mut self, token: &Token, reason: SkipReason) {
        eprintln!("{}: {}", token.display(), reason);
        debug!(token = %token.display(), %reason, "skipping token");
        self.core.record_skip();
    }

    async fn emit(&mut self, token: &Token) -> Result<()> {
        self.output
            .write_all(token.echo())
            .await
            .map_err(QueryError::from_write)?;
        self.output.flush().await.map_err(QueryError::from_write)
    }
}
