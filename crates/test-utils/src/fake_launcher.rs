use std::collections::HashMap;
use std::ffi::OsString;
use std::future::Future;
use std::io::{self, Read};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use query::errors::{QueryError, Result};
use query::exec::{ExitOutcome, LaunchRequest, Launcher};

/// What one fake launch received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub query_filename: OsString,
    pub stdin: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
enum Scripted {
    Outcome(ExitOutcome),
    ExecFailure,
}

/// A fake launcher that:
/// - records the `QUERY_FILENAME` and stdin bytes of every launch
/// - answers with a scripted outcome per file name (default: exit 0).
#[derive(Debug)]
pub struct FakeLauncher {
    scripted: HashMap<OsString, Scripted>,
    default: ExitOutcome,
    launched: Arc<Mutex<Vec<LaunchRecord>>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self {
            scripted: HashMap::new(),
            default: ExitOutcome::NormalExit(0),
            launched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Outcome for files without a scripted one.
    pub fn with_default(mut self, outcome: ExitOutcome) -> Self {
        self.default = outcome;
        self
    }

    pub fn with_outcome(
        mut self,
        query_filename: impl Into<OsString>,
        outcome: ExitOutcome,
    ) -> Self {
        self.scripted.insert(query_filename.into(), Scripted::Outcome(outcome));
        self
    }

    /// Report an exec failure when this file is launched.
    pub fn with_exec_failure(mut self, query_filename: impl Into<OsString>) -> Self {
        self.scripted.insert(query_filename.into(), Scripted::ExecFailure);
        self
    }

    /// Shared handle on the launch log; stays valid after the launcher is
    /// moved into a dispatcher.
    pub fn launched(&self) -> Arc<Mutex<Vec<LaunchRecord>>> {
        Arc::clone(&self.launched)
    }
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for FakeLauncher {
    fn launch(
        &mut self,
        mut request: LaunchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExitOutcome>> + Send + '_>> {
        Box::pin(async move {
            let mut stdin = Vec::new();
            request
                .input
                .read_to_end(&mut stdin)
                .map_err(anyhow::Error::from)?;

            let query_filename = request.query_filename.as_os_str().to_os_string();
            let scripted = self
                .scripted
                .get(&query_filename)
                .copied()
                .unwrap_or(Scripted::Outcome(self.default));

            {
                let mut guard = self.launched.lock().unwrap();
                guard.push(LaunchRecord {
                    query_filename,
                    stdin,
                });
            }

            match scripted {
                Scripted::Outcome(outcome) => Ok(outcome),
                Scripted::ExecFailure => Err(QueryError::ExecFailed {
                    command: "fake-command".to_string(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                }),
            }
        })
    }
}
