// tests/process_launcher.rs

mod common;
use crate::common::builders::Workspace;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::ffi::OsStr;
use std::fs::File;

use query::errors::QueryError;
use query::exec::{
    CommandSpec, ExitOutcome, LaunchRequest, Launcher, ProcessLauncher, QueryFilename,
};
use query::types::StderrPolicy;

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh", ["-c", script])
}

fn request(path: &std::path::Path) -> Result<LaunchRequest, Box<dyn Error>> {
    Ok(LaunchRequest {
        input: File::open(path)?,
        query_filename: QueryFilename::new(path.as_os_str())?,
    })
}

#[tokio::test]
async fn child_reads_file_contents_on_stdin() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let hit = ws.file("hit", "needle in here\n");
        let miss = ws.file("miss", "nothing\n");

        let grep = CommandSpec::new("grep", ["-q", "needle"]);
        let mut launcher = ProcessLauncher::new(grep, StderrPolicy::Inherit)?;

        assert_eq!(launcher.launch(request(&hit)?).await?, ExitOutcome::NormalExit(0));
        assert_eq!(launcher.launch(request(&miss)?).await?, ExitOutcome::NormalExit(1));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn child_sees_query_filename() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let file = ws.file("named.txt", "");
        let script = format!("test \"$QUERY_FILENAME\" = '{}'", file.display());

        let mut launcher = ProcessLauncher::new(sh(&script), StderrPolicy::Inherit)?;
        assert_eq!(launcher.launch(request(&file)?).await?, ExitOutcome::NormalExit(0));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn exit_codes_and_signals_are_reported() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let file = ws.file("f", "");

        let mut exits = ProcessLauncher::new(sh("exit 42"), StderrPolicy::Inherit)?;
        assert_eq!(exits.launch(request(&file)?).await?, ExitOutcome::NormalExit(42));

        let mut killed = ProcessLauncher::new(sh("kill -9 $$"), StderrPolicy::Inherit)?;
        let outcome = killed.launch(request(&file)?).await?;
        assert_eq!(outcome, ExitOutcome::KilledBySignal(9));
        assert_eq!(outcome.return_code(), 137);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn child_stdout_is_discarded() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let file = ws.file("f", "contents that must not leak\n");

        // With stdout going to /dev/null the write succeeds; a closed stdout
        // would make `cat` fail.
        let cat = CommandSpec::new("cat", Vec::<&str>::new());
        let mut launcher = ProcessLauncher::new(cat, StderrPolicy::Discard)?;
        assert_eq!(launcher.launch(request(&file)?).await?, ExitOutcome::NormalExit(0));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_program_is_an_exec_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let file = ws.file("f", "");

        let mut launcher = ProcessLauncher::new(
            CommandSpec::new("query-test-no-such-program", Vec::<&str>::new()),
            StderrPolicy::Inherit,
        )?;

        match launcher.launch(request(&file)?).await {
            Err(QueryError::ExecFailed { command, .. }) => {
                assert_eq!(command, "query-test-no-such-program")
            }
            other => panic!("expected ExecFailed, got {other:?}"),
        }
        Ok(())
    })
    .await
}

#[tokio::test]
async fn non_executable_program_is_an_exec_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let ws = Workspace::new();
        let file = ws.file("f", "");
        let not_executable = ws.file("script.sh", "#!/bin/sh\nexit 0\n");

        let mut launcher = ProcessLauncher::new(
            CommandSpec::new(not_executable.as_os_str(), Vec::<&str>::new()),
            StderrPolicy::Inherit,
        )?;

        let err = launcher
            .launch(request(&file)?)
            .await
            .expect_err("a file without the executable bit cannot be run");
        assert!(err.is_exec_failure(), "unexpected error: {err:?}");
        Ok(())
    })
    .await
}

#[test]
fn query_filename_rejects_nul_bytes() {
    let err = QueryFilename::new(OsStr::new("bad\0name")).unwrap_err();
    assert!(matches!(err, QueryError::EnvBinding { .. }));

    let ok = QueryFilename::new(OsStr::new("fine name=with equals")).unwrap();
    assert_eq!(ok.as_os_str(), "fine name=with equals");
}
